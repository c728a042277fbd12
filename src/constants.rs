/// Plaintext body returned by the health check.
pub const HEALTH_MESSAGE: &str = "Backend server is running!";

/// Subject of the credential issued by `/generate-demo-vc`.
pub const DEMO_SUBJECT_DID: &str =
    "did:ethr:sepolia:0x0386529f311bf92c9e32282eaaecbfb346fca888e10683cc1c0a02aceb3dec6a5c";
pub const DEMO_SUBJECT_NAME: &str = "Alice";

pub const VERIFY_FAILED: &str = "Verification failed";
pub const VERIFY_DEMO_FAILED: &str = "Verification of demo credential failed";
pub const GENERATE_DEMO_FAILED: &str = "Demo VC generation failed";

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:3000";
