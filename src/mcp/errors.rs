pub const PROTOCOL: &str = "Protocol";
pub const NOT_FOUND: &str = "NotFound";
pub const PARSE_ERROR: &str = "ParseError";
pub const UNSUPPORTED_FORMAT: &str = "UnsupportedFormat";
pub const ENCODING_ERROR: &str = "EncodingError";
pub const IO: &str = "Io";
pub const INTERNAL: &str = "Internal";
