// Backend protocol constants
pub const LEGACY_SIGNATURE_FORM: &str = "PKCS7";

// Application mount prefix every backend path lives under
pub const MOUNT_PREFIX: &str = "/kr-dss";
// Used when the verification result carries no download base
pub const FALLBACK_REPORTS_ROOT: &str = "/kr-dss/api/verify/reports/";

// Endpoint paths, relative to the service base URL
pub const SIGN_DOCUMENT_PATH: &str = "kr-dss/sign-document";
pub const VERIFY_PATH: &str = "kr-dss/api/verify";

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";
