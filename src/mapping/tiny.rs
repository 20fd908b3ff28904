//! Streaming decoder for the Tiny v2 mapping format.
//!
//! The artifact is line-oriented and tab-delimited. A header row declares the
//! format version and the ordered namespace list; class rows carry one name per
//! namespace; member rows are nested (one leading tab) under the most recently
//! seen class row and carry a descriptor plus one name per namespace:
//!
//! ```text
//! tiny	2	0	official	intermediary	named
//! c	a	net/minecraft/class_310	net/minecraft/client/MinecraftClient
//! 	f	I	b	field_1724	itemUseCooldown
//! 	m	()V	c	method_1508	tick
//! ```
//!
//! Rows that are neither class nor member rows (blank separators, comment rows,
//! parameter and local-variable rows, header properties) are metadata and are
//! skipped. Structural violations (wrong column count, duplicate namespaces,
//! member row before any class row, duplicate entries, invalid descriptors) are
//! rejected as [`crate::Error::Malformed`]; the decoder accepts exactly this
//! variant of the format and nothing else.
//!
//! Decoding is single-pass and streaming: rows are indexed as they arrive and the
//! artifact is never buffered whole.

use std::io::BufRead;

use tracing::debug;

use super::{descriptor, MappingTable, MemberKind, Namespaces, TableBuilder};
use crate::Result;

/// Header property enabling backslash escape sequences in name cells.
const PROP_ESCAPED_NAMES: &str = "escaped-names";

/// Decode a decompressed Tiny v2 stream into a [`MappingTable`].
///
/// ## Arguments
/// * 'reader' - Buffered reader over the decompressed artifact text
///
/// # Errors
/// Returns [`crate::Error::Malformed`] on any structural violation and
/// [`crate::Error::FileError`] if the underlying reader fails.
///
/// # Examples
///
/// ```rust
/// use mapscope::mapping::tiny::decode;
///
/// let data = "tiny\t2\t0\tofficial\tnamed\n\
///             c\ta\tcom/example/Widget\n\
///             \tm\t()V\tb\ttick\n";
/// let table = decode(data.as_bytes())?;
/// assert_eq!(table.classes().len(), 1);
/// # Ok::<(), mapscope::Error>(())
/// ```
pub fn decode(reader: impl BufRead) -> Result<MappingTable> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(malformed_error!("mapping stream is empty")),
    };
    let namespaces = parse_header(&header)?;
    let namespace_count = namespaces.len();

    let mut builder = TableBuilder::new(namespaces);
    let mut escaped_names = false;
    let mut classes = 0usize;
    let mut members = 0usize;

    for line in lines {
        let line = line?;
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let indent = fields.iter().take_while(|field| field.is_empty()).count();

        match (indent, fields.get(indent).copied()) {
            // Class row: marker plus one name per namespace.
            (0, Some("c")) => {
                let cells = &fields[1..];
                if cells.len() != namespace_count {
                    return Err(malformed_error!(
                        "class row has {} name columns, expected {}",
                        cells.len(),
                        namespace_count
                    ));
                }
                builder.begin_class(complete_names(cells, escaped_names)?)?;
                classes += 1;
            }
            (0, Some(keyword)) => {
                return Err(malformed_error!("unrecognized top-level row kind '{}'", keyword));
            }
            // Member row: marker, descriptor, one name per namespace.
            (1, Some(keyword @ ("m" | "f"))) => {
                let kind = if keyword == "m" { MemberKind::Method } else { MemberKind::Field };
                if !builder.has_classes() {
                    return Err(malformed_error!("{} row precedes any class row", keyword));
                }
                if fields.len() != 3 + namespace_count {
                    return Err(malformed_error!(
                        "{} row has {} columns, expected {}",
                        keyword,
                        fields.len(),
                        3 + namespace_count
                    ));
                }

                let member_descriptor = fields[2].to_string();
                match kind {
                    MemberKind::Method => {
                        descriptor::parse_method_descriptor(&member_descriptor)?;
                    }
                    MemberKind::Field => {
                        descriptor::parse_field_descriptor(&member_descriptor)?;
                    }
                }

                builder.add_member(kind, complete_names(&fields[3..], escaped_names)?, Some(member_descriptor))?;
                members += 1;
            }
            // Header property section: nested rows before the first class.
            (1, Some(property)) if !builder.has_classes() => {
                if property == PROP_ESCAPED_NAMES {
                    escaped_names = true;
                }
            }
            // Anything else nested is metadata: comments, parameters, locals.
            (_, _) => {}
        }
    }

    debug!(classes, members, namespaces = namespace_count, "decoded mapping table");
    Ok(builder.finish())
}

/// Parse the header row: `tiny`, major version `2`, a numeric minor version, and
/// at least one namespace label.
fn parse_header(line: &str) -> Result<Namespaces> {
    let fields: Vec<&str> = line.split('\t').collect();

    if fields.len() < 3 || fields[0] != "tiny" {
        return Err(malformed_error!("stream does not start with a tiny header row"));
    }
    if fields[1] != "2" {
        return Err(malformed_error!("unsupported tiny major version '{}'", fields[1]));
    }
    if fields[2].parse::<u32>().is_err() {
        return Err(malformed_error!("invalid tiny minor version '{}'", fields[2]));
    }

    Namespaces::from_labels(fields[3..].iter().map(|label| (*label).to_string()).collect())
}

/// Turn a row's name cells into one name per namespace. Empty cells inherit the
/// name from the first namespace, keeping the one-name-per-namespace invariant
/// total; an empty first cell has nothing to inherit from and is malformed.
fn complete_names(cells: &[&str], escaped: bool) -> Result<Vec<String>> {
    if cells[0].is_empty() {
        return Err(malformed_error!("row is missing a name in the first namespace"));
    }

    let mut names = Vec::with_capacity(cells.len());
    for cell in cells {
        let cell = if cell.is_empty() { cells[0] } else { cell };
        names.push(if escaped { unescape(cell)? } else { (*cell).to_string() });
    }
    Ok(names)
}

/// Resolve the `escaped-names` backslash sequences: `\\`, `\n`, `\r`, `\t`, `\0`.
fn unescape(cell: &str) -> Result<String> {
    if !cell.contains('\\') {
        return Ok(cell.to_string());
    }

    let mut out = String::with_capacity(cell.len());
    let mut chars = cell.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            _ => return Err(malformed_error!("invalid escape sequence in name cell '{}'", cell)),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const BASIC: &str = "tiny\t2\t0\tofficial\tintermediary\tnamed\n\
                         c\ta\tnet/minecraft/class_310\tnet/minecraft/client/MinecraftClient\n\
                         \tm\t()V\tc\tmethod_1508\ttick\n\
                         \tf\tI\tb\tfield_1724\titemUseCooldown\n";

    #[test]
    fn decodes_classes_and_members() {
        let table = decode(BASIC.as_bytes()).unwrap();
        assert_eq!(table.classes().len(), 1);

        let named = table.namespaces().ordinal("named").unwrap();
        let intermediary = table.namespaces().ordinal("intermediary").unwrap();
        let class = table.class(named, "net/minecraft/client/MinecraftClient").unwrap();
        assert_eq!(class.name(intermediary), Some("net/minecraft/class_310"));

        let method = class.method(named, "tick", Some("()V")).unwrap();
        assert_eq!(method.name(intermediary), Some("method_1508"));
        let field = class.field(named, "itemUseCooldown", Some("I")).unwrap();
        assert_eq!(field.name(0), Some("b"));
    }

    #[test]
    fn skips_comments_parameters_and_blanks() {
        let data = "tiny\t2\t0\tofficial\tnamed\n\
                    c\ta\tcom/example/Widget\n\
                    \tc\tThis widget does widget things\n\
                    \tm\t(I)V\tb\tresize\n\
                    \t\tp\t1\twidth\n\
                    \t\tc\tthe new width\n\
                    \n\
                    c\tb\tcom/example/Button\n";
        let table = decode(data.as_bytes()).unwrap();
        assert_eq!(table.classes().len(), 2);
        let class = table.class(1, "com/example/Widget").unwrap();
        assert_eq!(class.methods().len(), 1);
    }

    #[test]
    fn rejects_bad_headers() {
        for bad in [
            "",
            "v1\tofficial\tnamed\nc\ta\tb\n",
            "tiny\t3\t0\tofficial\tnamed\n",
            "tiny\t2\tx\tofficial\tnamed\n",
            "tiny\t2\t0\n",
            "tiny\t2\t0\tofficial\tofficial\n",
        ] {
            assert!(
                matches!(decode(bad.as_bytes()), Err(Error::Malformed { .. })),
                "accepted header of {bad:?}"
            );
        }
    }

    #[test]
    fn rejects_wrong_column_counts() {
        let short_class = "tiny\t2\t0\tofficial\tintermediary\tnamed\nc\ta\tb\n";
        assert!(matches!(decode(short_class.as_bytes()), Err(Error::Malformed { .. })));

        let long_member = "tiny\t2\t0\tofficial\tnamed\nc\ta\tb\n\tm\t()V\tc\td\te\n";
        assert!(matches!(decode(long_member.as_bytes()), Err(Error::Malformed { .. })));
    }

    #[test]
    fn rejects_member_before_class() {
        let data = "tiny\t2\t0\tofficial\tnamed\n\tm\t()V\ta\ttick\n";
        assert!(matches!(decode(data.as_bytes()), Err(Error::Malformed { .. })));
    }

    #[test]
    fn rejects_invalid_descriptor() {
        let data = "tiny\t2\t0\tofficial\tnamed\nc\ta\tb\n\tm\tnope\tc\ttick\n";
        assert!(matches!(decode(data.as_bytes()), Err(Error::Malformed { .. })));
    }

    #[test]
    fn rejects_unknown_top_level_row() {
        let data = "tiny\t2\t0\tofficial\tnamed\nq\ta\tb\n";
        assert!(matches!(decode(data.as_bytes()), Err(Error::Malformed { .. })));
    }

    #[test]
    fn empty_name_cells_inherit_the_first_namespace() {
        let data = "tiny\t2\t0\tofficial\tnamed\n\
                    c\tcom/example/Keep\t\n\
                    \tm\t()V\ta\t\n";
        let table = decode(data.as_bytes()).unwrap();
        let class = table.class(1, "com/example/Keep").unwrap();
        assert_eq!(class.name(0), Some("com/example/Keep"));
        assert_eq!(class.method(0, "a", None).unwrap().name(1), Some("a"));
    }

    #[test]
    fn escaped_names_property_is_honored() {
        let data = "tiny\t2\t0\tofficial\tnamed\n\
                    \tescaped-names\n\
                    c\ta\tcom/example/We\\tird\n";
        let table = decode(data.as_bytes()).unwrap();
        assert!(table.class(1, "com/example/We\tird").is_some());
    }

    #[test]
    fn decode_is_deterministic() {
        let first = decode(BASIC.as_bytes()).unwrap();
        let second = decode(BASIC.as_bytes()).unwrap();
        for (a, b) in first.classes().iter().zip(second.classes()) {
            for ordinal in 0..first.namespaces().len() {
                assert_eq!(a.name(ordinal), b.name(ordinal));
            }
        }
    }
}
