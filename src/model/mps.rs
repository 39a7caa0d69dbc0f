// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! A free-format MPS reader. Neither LP backend this crate ships exposes
//! its own file reader (`highs`'s public surface is a builder API;
//! `EnumBackend` is test-only), so [`crate::lp::LpModel`] parses instance
//! files itself and populates backends via `pass_model`.
//!
//! Supports `ROWS`, `COLUMNS` (with `INTORG`/`INTEND` markers), `RHS`,
//! `RANGES` and `BOUNDS`. Comment lines start with `*`.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{MipError, Result};
use crate::model::{Constraint, Variable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Objective,
    Le,
    Ge,
    Eq,
}

/// The static data of a MIP instance as read from an MPS file.
#[derive(Debug, Clone)]
pub struct ParsedInstance {
    pub variables: Vec<Variable>,
    pub constraints: Vec<Constraint>,
    pub objective: Vec<f64>,
}

pub fn read_mps(path: &Path) -> Result<ParsedInstance> {
    let text = std::fs::read_to_string(path).map_err(|e| MipError::InputError {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    parse_mps(path, &text)
}

fn parse_error(path: &Path, detail: impl Into<String>) -> MipError {
    MipError::InputError { path: path.to_path_buf(), detail: detail.into() }
}

fn parse_mps(path: &Path, text: &str) -> Result<ParsedInstance> {
    let mut row_order: Vec<String> = Vec::new();
    let mut row_kind: HashMap<String, RowKind> = HashMap::new();
    let mut row_index: HashMap<String, usize> = HashMap::new();
    let mut objective_row: Option<String> = None;

    let mut col_order: Vec<String> = Vec::new();
    let mut col_index: HashMap<String, usize> = HashMap::new();
    let mut col_is_integer: Vec<bool> = Vec::new();
    let mut col_lower: Vec<f64> = Vec::new();
    let mut col_upper: Vec<f64> = Vec::new();
    let mut col_has_explicit_bound: Vec<bool> = Vec::new();
    let mut objective: Vec<f64> = Vec::new();
    let mut entries: Vec<(usize, usize, f64)> = Vec::new(); // (row, col, coeff)

    let mut rhs: HashMap<String, f64> = HashMap::new();
    let mut ranges: HashMap<String, f64> = HashMap::new();

    let mut section = "";
    let mut in_integer_block = false;

    for raw_line in text.lines() {
        let line = raw_line.trim_end();
        if line.is_empty() || line.trim_start().starts_with('*') {
            continue;
        }
        if !line.starts_with(' ') && !line.starts_with('\t') {
            section = match line.split_whitespace().next() {
                Some(s) => s,
                None => continue,
            };
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        match section {
            "ROWS" => {
                if fields.len() < 2 {
                    return Err(parse_error(path, format!("malformed ROWS line: {line}")));
                }
                let kind = match fields[0] {
                    "N" => RowKind::Objective,
                    "L" => RowKind::Le,
                    "G" => RowKind::Ge,
                    "E" => RowKind::Eq,
                    other => return Err(parse_error(path, format!("unknown row type {other}"))),
                };
                let name = fields[1].to_string();
                if kind == RowKind::Objective {
                    if objective_row.is_none() {
                        objective_row = Some(name.clone());
                    }
                } else {
                    row_index.insert(name.clone(), row_order.len());
                    row_order.push(name.clone());
                }
                row_kind.insert(name, kind);
            }
            "COLUMNS" => {
                if fields.len() >= 3 && fields[1] == "'MARKER'" {
                    in_integer_block = fields.get(2).map(|s| s.contains("INTORG")).unwrap_or(false);
                    continue;
                }
                if fields.len() < 3 || fields.len() % 2 != 1 {
                    return Err(parse_error(path, format!("malformed COLUMNS line: {line}")));
                }
                let col_name = fields[0];
                let idx = *col_index.entry(col_name.to_string()).or_insert_with(|| {
                    col_order.push(col_name.to_string());
                    col_is_integer.push(in_integer_block);
                    col_lower.push(0.0);
                    col_upper.push(f64::INFINITY);
                    col_has_explicit_bound.push(false);
                    objective.push(0.0);
                    col_order.len() - 1
                });

                let mut pairs = fields[1..].chunks(2);
                while let Some(pair) = pairs.next() {
                    let row_name = pair[0];
                    let value: f64 = pair[1]
                        .parse()
                        .map_err(|_| parse_error(path, format!("not a number: {}", pair[1])))?;
                    if Some(row_name.to_string()) == objective_row {
                        objective[idx] = value;
                    } else if let Some(&row) = row_index.get(row_name) {
                        entries.push((row, idx, value));
                    } else {
                        return Err(parse_error(path, format!("unknown row {row_name}")));
                    }
                }
            }
            "RHS" => {
                if fields.len() < 3 {
                    continue;
                }
                let mut pairs = fields[1..].chunks(2);
                while let Some(pair) = pairs.next() {
                    let value: f64 = pair[1]
                        .parse()
                        .map_err(|_| parse_error(path, format!("not a number: {}", pair[1])))?;
                    rhs.insert(pair[0].to_string(), value);
                }
            }
            "RANGES" => {
                if fields.len() < 3 {
                    continue;
                }
                let mut pairs = fields[1..].chunks(2);
                while let Some(pair) = pairs.next() {
                    let value: f64 = pair[1]
                        .parse()
                        .map_err(|_| parse_error(path, format!("not a number: {}", pair[1])))?;
                    ranges.insert(pair[0].to_string(), value);
                }
            }
            "BOUNDS" => {
                if fields.len() < 3 {
                    continue;
                }
                let kind = fields[0];
                let col_name = fields[2];
                let Some(&idx) = col_index.get(col_name) else {
                    return Err(parse_error(path, format!("bound on unknown column {col_name}")));
                };
                col_has_explicit_bound[idx] = true;
                let value = fields.get(3).and_then(|v| v.parse::<f64>().ok());
                match kind {
                    "UP" => col_upper[idx] = value.unwrap_or(f64::INFINITY),
                    "LO" => col_lower[idx] = value.unwrap_or(0.0),
                    "FX" => {
                        let v = value.unwrap_or(0.0);
                        col_lower[idx] = v;
                        col_upper[idx] = v;
                    }
                    "FR" => {
                        col_lower[idx] = f64::NEG_INFINITY;
                        col_upper[idx] = f64::INFINITY;
                    }
                    "MI" => col_lower[idx] = f64::NEG_INFINITY,
                    "PL" => col_upper[idx] = f64::INFINITY,
                    "BV" => {
                        col_lower[idx] = 0.0;
                        col_upper[idx] = 1.0;
                        col_is_integer[idx] = true;
                    }
                    other => return Err(parse_error(path, format!("unknown bound type {other}"))),
                }
            }
            "ENDATA" | "NAME" | "OBJSENSE" => {}
            other => return Err(parse_error(path, format!("unsupported section {other}"))),
        }
    }

    let mut constraints: Vec<Constraint> = row_order
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let kind = row_kind[name];
            let base = rhs.get(name).copied().unwrap_or(0.0);
            let (mut lower, mut upper) = match kind {
                RowKind::Le => (f64::NEG_INFINITY, base),
                RowKind::Ge => (base, f64::INFINITY),
                RowKind::Eq => (base, base),
                RowKind::Objective => unreachable!("objective row excluded from row_order"),
            };
            if let Some(&r) = ranges.get(name) {
                match kind {
                    RowKind::Le => lower = upper - r.abs(),
                    RowKind::Ge => upper = lower + r.abs(),
                    RowKind::Eq => {
                        if r >= 0.0 {
                            upper = lower + r;
                        } else {
                            lower += r;
                        }
                    }
                    RowKind::Objective => unreachable!(),
                }
            }
            Constraint::new(i, lower, upper)
        })
        .collect();

    for (row, col, coeff) in entries {
        constraints[row].add_term(col, coeff);
    }

    // An integer column with no explicit BOUNDS entry defaults to `[0,1]`
    // per the MPS convention, not the general `[0,+inf)` default.
    for i in 0..col_order.len() {
        if col_is_integer[i] && !col_has_explicit_bound[i] {
            col_upper[i] = 1.0;
        }
    }

    let mut variables: Vec<Variable> = col_order
        .iter()
        .enumerate()
        .map(|(i, name)| Variable::new(i, name.clone(), col_lower[i], col_upper[i], col_is_integer[i]))
        .collect();

    for constraint in &constraints {
        for v in constraint.vars() {
            variables[v].incident_constraints.push(constraint.index);
        }
    }

    if variables.is_empty() {
        return Err(parse_error(path, "instance defines no columns"));
    }

    Ok(ParsedInstance { variables, constraints, objective })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
NAME          TESTPROB
ROWS
 N  COST
 L  LIM1
 G  LIM2
 E  MYEQN
COLUMNS
    MARKER                 'MARKER'                 'INTORG'
    X1        COST            1.0   LIM1            1.0
    X1        LIM2            1.0
    MARKER                 'MARKER'                 'INTEND'
    X2        COST            2.0   MYEQN           1.0
RHS
    RHS       LIM1            4.0   LIM2            1.0
    RHS       MYEQN           7.0
BOUNDS
 UP BND       X1              4.0
ENDATA
";

    #[test]
    fn parses_rows_columns_and_bounds() {
        let parsed = parse_mps(Path::new("sample.mps"), SAMPLE).unwrap();
        assert_eq!(parsed.variables.len(), 2);
        assert_eq!(parsed.objective, vec![1.0, 2.0]);
        assert!(parsed.variables[0].is_integer);
        assert!(!parsed.variables[1].is_integer);
        assert_eq!(parsed.variables[0].upper, 4.0);
    }

    #[test]
    fn row_bounds_match_row_type() {
        let parsed = parse_mps(Path::new("sample.mps"), SAMPLE).unwrap();
        let lim1 = &parsed.constraints[0];
        assert_eq!((lim1.lower, lim1.upper), (f64::NEG_INFINITY, 4.0));
        let lim2 = &parsed.constraints[1];
        assert_eq!((lim2.lower, lim2.upper), (1.0, f64::INFINITY));
        let myeqn = &parsed.constraints[2];
        assert_eq!((myeqn.lower, myeqn.upper), (7.0, 7.0));
    }

    #[test]
    fn rejects_unknown_row_reference() {
        let bad = "ROWS\n N COST\nCOLUMNS\n X1 COST 1.0 NOPE 2.0\nENDATA\n";
        assert!(parse_mps(Path::new("bad.mps"), bad).is_err());
    }

    #[test]
    fn an_integer_column_with_no_bounds_entry_defaults_to_zero_one() {
        let no_bounds: &str = "\
NAME          NOBOUNDS
ROWS
 N  COST
 L  LIM1
COLUMNS
    MARKER                 'MARKER'                 'INTORG'
    X1        COST            1.0   LIM1            1.0
    MARKER                 'MARKER'                 'INTEND'
RHS
    RHS       LIM1            4.0
ENDATA
";
        let parsed = parse_mps(Path::new("no_bounds.mps"), no_bounds).unwrap();
        assert_eq!((parsed.variables[0].lower, parsed.variables[0].upper), (0.0, 1.0));
    }
}
