use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Attempt to read a JSON document from stdin if data is being piped,
/// deserialising straight into the target input type.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_typed<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(trimmed)?))
}
