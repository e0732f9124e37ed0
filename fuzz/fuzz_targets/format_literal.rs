//! Fuzz test for decoding and literal formatting of arbitrary column bytes.
//!
//! This fuzzer feeds arbitrary bytes under arbitrary column types and verifies that:
//! 1. Decoding and formatting never panic
//! 2. NULL is always rendered bare
//! 3. Quoted literals never contain an unescaped quote
//! 4. Hex literals carry two digits per byte

use binlog_flashback::ColumnType;
use binlog_flashback::encoding::{ColumnValueDecoder, DatumDecoder, DecodedScalar};
use binlog_flashback::render::format_literal;
use honggfuzz::fuzz;

/// Returns true if every `'` inside `body` is escaped by an odd run of backslashes.
fn quotes_escaped(body: &str) -> bool {
    let mut backslashes = 0usize;
    for c in body.chars() {
        if c == '\\' {
            backslashes += 1;
            continue;
        }
        if c == '\'' && backslashes % 2 == 0 {
            return false;
        }
        backslashes = 0;
    }
    backslashes % 2 == 0
}

fn main() {
    loop {
        fuzz!(|input: (ColumnType, Vec<u8>)| {
            let (column_type, encoded) = input;
            let Ok(scalar) = DatumDecoder.decode(column_type, &encoded) else {
                return;
            };
            let Ok(literal) = format_literal(&scalar, column_type) else {
                return;
            };

            if scalar == DecodedScalar::Null {
                assert_eq!(literal, "null");
                return;
            }

            if let DecodedScalar::ByteString(bytes) = &scalar {
                if column_type.is_blob() {
                    assert_eq!(literal.len(), 2 + 2 * bytes.len(), "bad hex literal {literal}");
                }
            }

            let escaped = matches!(
                column_type,
                ColumnType::Varchar | ColumnType::String | ColumnType::Json
            );
            if escaped && literal.len() >= 2 && literal.starts_with('\'') {
                let body = &literal[1..literal.len() - 1];
                assert!(quotes_escaped(body), "unescaped quote in {literal}");
            }
        });
    }
}
