//! Print the OpenAPI document as pretty JSON on stdout.
//!
//! ```sh
//! cargo run --manifest-path backend/Cargo.toml --bin openapi-dump > openapi.json
//! ```

use std::io::{self, Write};

use civicflow_backend::ApiDoc;
use utoipa::OpenApi;

fn main() -> io::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|err| io::Error::other(format!("failed to serialise OpenAPI document: {err}")))?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")
}
