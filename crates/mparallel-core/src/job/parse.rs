//! Job-file parsing: alternating memory and command lines.

use crate::error::ParseError;

use super::Job;

/// Parses job-file lines into jobs, in file order.
///
/// Lines are trimmed and blank lines are ignored entirely, so pairing follows
/// the order of non-blank lines: memory, command, memory, command, ...
/// Error line numbers are 1-based physical line numbers.
pub fn parse_job_lines<I, S>(lines: I) -> Result<Vec<Job>, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut memories = Vec::new();
    let mut commands = Vec::new();
    let mut parity = 0usize;

    for (idx, line) in lines.into_iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        if parity % 2 == 1 {
            commands.push(line.to_string());
        } else {
            let memory = line
                .parse::<u64>()
                .map_err(|_| ParseError::InvalidMemory { line: idx + 1 })?;
            memories.push(memory);
        }
        parity += 1;
    }

    if memories.len() != commands.len() {
        return Err(ParseError::CountMismatch {
            memories: memories.len(),
            commands: commands.len(),
        });
    }

    Ok(commands
        .into_iter()
        .zip(memories)
        .map(|(command, memory)| Job::new(command, memory))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pairs_in_file_order() {
        let jobs = parse_job_lines(["10", "echo a", "20", "echo b"]).unwrap();
        assert_eq!(jobs, vec![Job::new("echo a", 10), Job::new("echo b", 20)]);
    }

    #[test]
    fn parse_trims_and_skips_blank_lines() {
        let text = "\n  5  \n\n  make -C foo  \n\n7\n\tcd x; make run\n";
        let jobs = parse_job_lines(text.lines()).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0], Job::new("make -C foo", 5));
        assert_eq!(jobs[1], Job::new("cd x; make run", 7));
    }

    #[test]
    fn blank_line_between_memory_and_command_keeps_pairing() {
        let jobs = parse_job_lines(["3", "", "true"]).unwrap();
        assert_eq!(jobs, vec![Job::new("true", 3)]);
    }

    #[test]
    fn parse_rejects_non_numeric_memory_with_physical_line() {
        let err = parse_job_lines(["1", "true", "", "lots", "false"]).unwrap_err();
        assert_eq!(err, ParseError::InvalidMemory { line: 4 });
    }

    #[test]
    fn parse_rejects_negative_memory() {
        let err = parse_job_lines(["-1", "true"]).unwrap_err();
        assert_eq!(err, ParseError::InvalidMemory { line: 1 });
    }

    #[test]
    fn parse_rejects_dangling_memory_line() {
        let err = parse_job_lines(["1", "true", "2"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::CountMismatch {
                memories: 2,
                commands: 1
            }
        );
    }

    #[test]
    fn parse_empty_input_is_empty_list() {
        let jobs = parse_job_lines(Vec::<String>::new()).unwrap();
        assert!(jobs.is_empty());
        let jobs = parse_job_lines(["", "   "]).unwrap();
        assert!(jobs.is_empty());
    }
}
