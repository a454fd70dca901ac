#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 4;
const GAP: &str = "  ";

/// Render an aligned plain-text table. Numeric cells are right-aligned.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();
    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, max_width);
    }

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&clip(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(GAP);
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = vec![header_line.trim_end().to_string(), divider];
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = clip(row.get(index).map_or("-", String::as_str), *width);
                let numeric = is_numeric(&cell);
                let padded = pad(&cell, *width, numeric);
                if options.color { colorize(&cell, padded) } else { padded }
            })
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Narrow the widest column one character at a time until the table fits.
fn shrink_to_fit(widths: &mut [usize], max_width: usize) {
    let gaps = widths.len().saturating_sub(1) * GAP.len();
    while widths.iter().sum::<usize>() + gaps > max_width {
        let Some((index, width)) = widths
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, width)| *width > MIN_COLUMN)
            .max_by_key(|(_, width)| *width)
        else {
            break;
        };
        widths[index] = width - 1;
    }
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out = value.chars().take(width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit() || ch == '-')
        && value.chars().any(|ch| ch.is_ascii_digit())
}

/// Color workflow and severity values; padding stays outside the escape codes.
fn colorize(cell: &str, padded: String) -> String {
    let code = match cell {
        "DONE" | "true" => "32",
        "IN_PROGRESS" | "IN_REVIEW" | "HIGH" | "MAJOR" => "33",
        "BLOCKED" | "BLOCKER" | "CRITICAL" | "false" => "31",
        _ => return padded,
    };
    padded.replacen(cell, &format!("\u{1b}[{code}m{cell}\u{1b}[0m"), 1)
}
