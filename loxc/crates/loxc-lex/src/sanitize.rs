//! Raw-byte ingestion: turns arbitrary bytes (e.g. a file read with
//! `std::fs::read`) into the valid UTF-8 `&str` every other stage of the
//! toolchain operates on.
//!
//! spec.md §4.1 requires that an invalid leading byte "advances one byte,
//! emits an `ILLEGAL` token diagnostic 'invalid UTF-8 byte 0xNN', and
//! continues" rather than aborting (spec.md §6). [`Lexer`](crate::Lexer)
//! itself takes a `&str` and so can never observe invalid bytes - by the
//! time a `&str` exists, the standard library has already guaranteed it is
//! valid UTF-8. [`sanitize_utf8`] is the recovery path instead: it walks
//! the raw bytes, replaces each invalid leading byte with `?` (a single
//! ASCII byte, so every later byte offset still lines up with the
//! original file), and reports it through the same [`Handler`] the lexer
//! itself reports into.

use loxc_util::diagnostic::DiagnosticCode;
use loxc_util::{DiagnosticBuilder, Handler, Span};

/// Returns the number of bytes a UTF-8 sequence starting with `lead` is
/// supposed to occupy, or `None` if `lead` cannot start a sequence at all
/// (a stray continuation byte or one of the bytes UTF-8 never uses).
fn expected_len(lead: u8) -> Option<usize> {
    match lead {
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

/// Scans `bytes` for invalid UTF-8 and returns a valid UTF-8 `String` of
/// the same length, with each invalid leading byte diagnosed into
/// `handler` and replaced by `?` (spec.md §4.1, §6).
pub fn sanitize_utf8(bytes: &[u8], handler: &mut Handler) -> String {
    let mut out = Vec::with_capacity(bytes.len());
    let mut pos = 0;
    let mut line = 1u32;
    let mut column = 1u32;

    while pos < bytes.len() {
        let lead = bytes[pos];

        if lead < 0x80 {
            out.push(lead);
            if lead == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
            pos += 1;
            continue;
        }

        let valid_seq = expected_len(lead).and_then(|len| {
            let end = pos + len;
            (end <= bytes.len() && std::str::from_utf8(&bytes[pos..end]).is_ok()).then_some(len)
        });

        match valid_seq {
            Some(len) => {
                out.extend_from_slice(&bytes[pos..pos + len]);
                column += 1;
                pos += len;
            },
            None => {
                let span = Span::new(pos, pos + 1, line, column);
                DiagnosticBuilder::error(format!("invalid UTF-8 byte {lead:#04x}"))
                    .span(span)
                    .code(DiagnosticCode::E_LEX_BAD_UTF8)
                    .emit(handler);
                out.push(b'?');
                column += 1;
                pos += 1;
            },
        }
    }

    String::from_utf8(out).expect("sanitize_utf8 only ever pushes ASCII or validated UTF-8 sequences")
}
