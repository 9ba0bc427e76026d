//! The `#names` / `#links` graph format.

use std::io::Write;

use crate::errors::FormatError;
use crate::graph::{Mark, PagGraph};

/// Write the graph in the canonical text format.
pub fn write_text_format(graph: &PagGraph, out: &mut impl Write) -> Result<(), FormatError> {
    writeln!(out, "#names")?;
    for var in 0..graph.var_count() {
        writeln!(out, "{}\t{}", var, graph.var_name(var))?;
    }
    writeln!(out, "#links")?;
    for (x, y) in graph.list_all_links() {
        writeln!(
            out,
            "{}\t{}\t{}",
            graph.var_name(x),
            graph.link_representation(x, y),
            graph.var_name(y)
        )?;
    }
    Ok(())
}

/// Parse a graph from the canonical text format.
pub fn read_text_format(input: &str) -> Result<PagGraph, FormatError> {
    let mut lines = input.lines().enumerate();

    let (_, header) = lines.next().unwrap_or((0, ""));
    if header != "#names" {
        return Err(FormatError::MissingHeader {
            expected: "#names".to_string(),
            found: header.to_string(),
        });
    }

    let mut names: Vec<(usize, String)> = Vec::new();
    let mut link_lines: Vec<(usize, &str)> = Vec::new();
    let mut in_links = false;
    for (line_no, line) in lines {
        if line == "#links" {
            in_links = true;
            continue;
        }
        if line.is_empty() {
            continue;
        }
        if in_links {
            link_lines.push((line_no, line));
        } else {
            let mut fields = line.split('\t');
            let index = fields
                .next()
                .and_then(|f| f.parse::<usize>().ok())
                .ok_or_else(|| FormatError::MalformedLine {
                    line: line_no + 1,
                    reason: "expected numeric variable index".to_string(),
                })?;
            let name = fields.next().ok_or_else(|| FormatError::MalformedLine {
                line: line_no + 1,
                reason: "expected variable name after index".to_string(),
            })?;
            names.push((index, name.to_string()));
        }
    }
    if !in_links {
        return Err(FormatError::MissingHeader {
            expected: "#links".to_string(),
            found: String::new(),
        });
    }

    names.sort_by_key(|(index, _)| *index);
    let mut graph = PagGraph::new(names.into_iter().map(|(_, name)| name), false)?;

    for (line_no, line) in link_lines {
        let fields: Vec<&str> = line.split('\t').collect();
        let [name1, token, name2] = fields[..] else {
            return Err(FormatError::MalformedLine {
                line: line_no + 1,
                reason: "expected name<TAB>token<TAB>name".to_string(),
            });
        };
        let x = graph
            .var_index(name1)
            .ok_or_else(|| FormatError::UnknownVariable {
                name: name1.to_string(),
            })?;
        let y = graph
            .var_index(name2)
            .ok_or_else(|| FormatError::UnknownVariable {
                name: name2.to_string(),
            })?;
        let (at_x, at_y) = parse_link_token(token)?;
        graph.add_link(x, y);
        graph.set_end_symbol(y, x, at_x)?;
        graph.set_end_symbol(x, y, at_y)?;
    }

    Ok(graph)
}

/// Split a 3-character link token into the marks at the first and second
/// variable.
pub(crate) fn parse_link_token(token: &str) -> Result<(Mark, Mark), FormatError> {
    let chars: Vec<char> = token.chars().collect();
    let [left, _, right] = chars[..] else {
        return Err(FormatError::UnknownLinkToken {
            token: token.to_string(),
        });
    };
    match (Mark::from_left_char(left), Mark::from_right_char(right)) {
        (Some(at_x), Some(at_y)) => Ok((at_x, at_y)),
        _ => Err(FormatError::UnknownLinkToken {
            token: token.to_string(),
        }),
    }
}
