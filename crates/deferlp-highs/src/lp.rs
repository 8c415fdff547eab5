//! LP-format model files and `.sol` solution files.
#![allow(clippy::float_cmp)]

use crate::problem::{Column, Row, is_infinite};
use std::fmt::{self, Write as _};

fn number(value: f64) -> String {
    if is_infinite(value) {
        if value > 0.0 { "+inf".into() } else { "-inf".into() }
    } else {
        format!("{value}")
    }
}

/// Write `coeff name` terms with explicit signs.
fn linear(out: &mut String, terms: impl IntoIterator<Item = (f64, String)>) -> fmt::Result {
    let mut first = true;
    for (coeff, name) in terms {
        let sign = if coeff < 0.0 { "-" } else { "+" };
        let magnitude = coeff.abs();
        if first {
            if coeff < 0.0 {
                out.push_str(" -");
            }
        } else {
            write!(out, " {sign}")?;
        }
        if magnitude == 1.0 {
            write!(out, " {name}")?;
        } else {
            write!(out, " {} {name}", number(magnitude))?;
        }
        first = false;
    }
    if first {
        out.push_str(" 0");
    }
    Ok(())
}

fn column_name(columns: &[Column], index: usize) -> String {
    columns
        .get(index)
        .map_or_else(|| format!("C{index}"), |column| column.name.clone())
}

fn write_bounds(out: &mut String, columns: &[Column]) -> fmt::Result {
    out.push_str("Bounds\n");
    for column in columns {
        let (lb, ub) = (column.lb, column.ub);
        if column.vtype == 'B' && lb == 0.0 && ub == 1.0 {
            continue;
        }
        match (is_infinite(lb) && lb < 0.0, is_infinite(ub)) {
            (true, true) => writeln!(out, " {} free", column.name)?,
            (false, true) if lb == 0.0 => {}
            (false, true) => writeln!(out, " {} >= {}", column.name, number(lb))?,
            _ if lb == ub => writeln!(out, " {} = {}", column.name, number(lb))?,
            _ => writeln!(
                out,
                " {} <= {} <= {}",
                number(lb),
                column.name,
                number(ub)
            )?,
        }
    }
    Ok(())
}

fn write_section(
    out: &mut String,
    title: &str,
    columns: &[Column],
    codes: &[char],
) -> fmt::Result {
    let names: Vec<&str> = columns
        .iter()
        .filter(|column| codes.contains(&column.vtype))
        .map(|column| column.name.as_str())
        .collect();
    if names.is_empty() {
        return Ok(());
    }
    writeln!(out, "{title}\n {}", names.join(" "))
}

/// Render the model in LP format. `sense` is `1` to minimize, `-1` to maximize.
pub(crate) fn render_lp(
    name: &str,
    columns: &[Column],
    rows: &[Row],
    sense: i32,
    obj_con: f64,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "\\ Model {name}")?;
    out.push_str(if sense < 0 { "Maximize\n" } else { "Minimize\n" });
    out.push_str(" obj:");
    linear(
        &mut out,
        columns
            .iter()
            .filter(|column| column.obj != 0.0)
            .map(|column| (column.obj, column.name.clone())),
    )?;
    if obj_con != 0.0 {
        let sign = if obj_con < 0.0 { "-" } else { "+" };
        write!(out, " {sign} {}", number(obj_con.abs()))?;
    }
    out.push('\n');

    out.push_str("Subject To\n");
    for row in rows {
        write!(out, " {}:", row.name)?;
        linear(
            &mut out,
            row.terms
                .iter()
                .map(|&(index, coeff)| (coeff, column_name(columns, index))),
        )?;
        let sense = match row.sense {
            '<' => "<=",
            '>' => ">=",
            _ => "=",
        };
        writeln!(out, " {sense} {}", number(row.rhs))?;
    }

    write_bounds(&mut out, columns)?;
    write_section(&mut out, "Binaries", columns, &['B'])?;
    write_section(&mut out, "Generals", columns, &['I', 'N'])?;
    write_section(&mut out, "Semi-Continuous", columns, &['S', 'N'])?;
    out.push_str("End\n");
    Ok(out)
}

/// Render primal values, one `name value` line per column.
pub(crate) fn render_sol(
    name: &str,
    columns: &[Column],
    x: &[f64],
    obj_val: f64,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "# Solution for model {name}")?;
    writeln!(out, "# Objective value = {obj_val}")?;
    for (column, value) in columns.iter().zip(x) {
        writeln!(out, "{} {value}", column.name)?;
    }
    Ok(out)
}
