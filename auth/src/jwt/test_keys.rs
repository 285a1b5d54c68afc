pub const PRIVATE_KEY: &str = include_str!("../../../fixtures/keys/primary_private.pem");
pub const PUBLIC_KEY: &str = include_str!("../../../fixtures/keys/primary_public.pem");

// Unrelated pair, for wrong-key checks.
pub const FOREIGN_PRIVATE_KEY: &str = include_str!("../../../fixtures/keys/foreign_private.pem");
pub const FOREIGN_PUBLIC_KEY: &str = include_str!("../../../fixtures/keys/foreign_public.pem");
