//! Trace parsing: tokenizes the line-oriented trace format (§6 of the
//! simulator's interface) into [`TraceEntry`] values the core driver
//! consumes. This is the "Parser / CLI" collaborator the core crate treats
//! as external and already-validated input.

use coherence_core::common::SimError;
use coherence_core::sim::{Op, TraceEntry};

/// Parses one trace line into a [`TraceEntry`], or `None` for a blank line.
///
/// `line_no` is the 1-indexed line number used in error diagnostics;
/// `num_processors` bounds the processor id accepted in a reference line.
pub fn parse_line(raw: &str, line_no: usize, num_processors: usize) -> Result<Option<TraceEntry>, SimError> {
    let line = raw.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [directive] => Ok(Some(parse_directive(directive, line_no)?)),
        [proc, op, addr] => {
            let processor = parse_processor(proc, line_no, num_processors)?;
            let op = parse_op(op, line_no)?;
            let address = parse_address(addr, line_no)?;
            Ok(Some(TraceEntry::Access { processor, op, address }))
        }
        _ => Err(SimError::trace(line_no, format!("malformed line: '{line}'"))),
    }
}

fn parse_directive(token: &str, line_no: usize) -> Result<TraceEntry, SimError> {
    match token {
        "v" => Ok(TraceEntry::ToggleVerbose),
        "p" => Ok(TraceEntry::DumpCaches),
        "h" => Ok(TraceEntry::HitRate),
        other => Err(SimError::trace(
            line_no,
            format!("trace argument '{other}' is not accepted; must be 'v', 'p', or 'h'"),
        )),
    }
}

fn parse_processor(token: &str, line_no: usize, num_processors: usize) -> Result<usize, SimError> {
    let digits = token
        .strip_prefix('P')
        .ok_or_else(|| SimError::trace(line_no, format!("expected a processor id like 'P0', got '{token}'")))?;
    let id: usize = digits
        .parse()
        .map_err(|_| SimError::trace(line_no, format!("invalid processor id '{token}'")))?;
    if id >= num_processors {
        return Err(SimError::trace(
            line_no,
            format!("processor id {id} out of range (0..{num_processors})"),
        ));
    }
    Ok(id)
}

fn parse_op(token: &str, line_no: usize) -> Result<Op, SimError> {
    match token {
        "R" => Ok(Op::Read),
        "W" => Ok(Op::Write),
        other => Err(SimError::trace(line_no, format!("unknown opcode '{other}'; must be 'R' or 'W'"))),
    }
}

fn parse_address(token: &str, line_no: usize) -> Result<u32, SimError> {
    token
        .parse()
        .map_err(|_| SimError::trace(line_no, format!("invalid address '{token}'")))
}
