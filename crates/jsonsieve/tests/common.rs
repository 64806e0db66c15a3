#![allow(missing_docs, dead_code)]

pub const QUOTES: &str = r#"{"symbol":"YHOO","price":20.31,"volume":200,"halted":false,"venue":null}
{"symbol":"MSFT","price":371.5,"volume":1250,"halted":false,"venue":{"name":"XNAS","open":true}}
{"symbol":"ACME","price":1.51e-6,"volume":0,"halted":true,"venue":null}
"#;

/// A fresh path under the system temp directory, unique per test name.
pub fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("jsonsieve-{}-{name}", std::process::id()))
}
