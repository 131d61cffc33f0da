#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use raincoat_core::error::ClientCode;
use raincoat_core::RaincoatError;

#[test]
fn client_codes_are_stable() {
    let cases = [
        (RaincoatError::BadRequest("x".into()), "BAD_REQUEST"),
        (RaincoatError::Store("disk full".into()), "STORE"),
        (RaincoatError::Transfer("refused".into()), "TRANSFER"),
        (RaincoatError::UnsupportedVersion, "UNSUPPORTED_VERSION"),
        (RaincoatError::Internal("boom".into()), "INTERNAL"),
    ];
    for (err, code) in cases {
        assert_eq!(err.client_code().as_str(), code);
    }
}

#[test]
fn store_error_message_keeps_cause() {
    let err = RaincoatError::Store("open failed: unable to open database file".into());
    assert_eq!(err.client_code(), ClientCode::Store);
    assert!(err.to_string().contains("unable to open database file"));
}
