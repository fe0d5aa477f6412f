//! Command-line parsing. Hand-rolled: the surface is three flags.

pub const DEFAULT_REFRESH_SECS: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedArgs {
    /// `-u`; None means "use the config file value".
    pub refresh_secs: Option<u64>,
    pub once: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("{0}")]
    Help(String),
    #[error("{msg}\n{usage}")]
    Invalid { msg: String, usage: String },
}

impl ArgsError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ArgsError::Help(_) => 0,
            ArgsError::Invalid { .. } => 2,
        }
    }
}

pub fn usage(prog: &str) -> String {
    format!(
        "Usage: {prog} [-u SECONDS] [--once] [-h]\n\
         \x20 -h, --help            Display this message\n\
         \x20 -u, --update SECONDS  Refresh interval in whole seconds (default {DEFAULT_REFRESH_SECS})\n\
         \x20     --once            Print one snapshot as JSON and exit"
    )
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, ArgsError> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "merrin".into());
    let invalid = |msg: String| ArgsError::Invalid {
        msg,
        usage: usage(&prog),
    };
    let mut parsed = ParsedArgs::default();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(ArgsError::Help(usage(&prog))),
            "-u" | "--update" => {
                let v = it
                    .next()
                    .ok_or_else(|| invalid(format!("{arg} requires a value")))?;
                parsed.refresh_secs = Some(parse_secs(&v).map_err(invalid)?);
            }
            "--once" => parsed.once = true,
            _ if arg.starts_with("--update=") || arg.starts_with("-u=") => {
                let (_, v) = arg.split_once('=').unwrap_or_default();
                parsed.refresh_secs = Some(parse_secs(v).map_err(invalid)?);
            }
            // getopt-style glued value: -u5
            _ if arg.starts_with("-u") && arg.len() > 2 => {
                parsed.refresh_secs = Some(parse_secs(&arg[2..]).map_err(invalid)?);
            }
            _ => return Err(invalid(format!("unrecognized argument '{arg}'"))),
        }
    }
    Ok(parsed)
}

fn parse_secs(v: &str) -> Result<u64, String> {
    v.trim()
        .parse::<u64>()
        .map_err(|_| format!("invalid refresh interval '{v}': expected whole seconds"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        std::iter::once("merrin")
            .chain(v.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults_when_no_flags() {
        assert_eq!(parse_args(args(&[])).unwrap(), ParsedArgs::default());
    }

    #[test]
    fn update_interval_forms() {
        for form in [&["-u", "5"][..], &["--update", "5"], &["-u=5"], &["--update=5"], &["-u5"]] {
            let p = parse_args(args(form)).unwrap();
            assert_eq!(p.refresh_secs, Some(5), "{form:?}");
        }
    }

    #[test]
    fn help_exits_zero() {
        let err = parse_args(args(&["-u", "3", "-h"])).unwrap_err();
        assert_eq!(err.exit_code(), 0);
        assert!(err.to_string().contains("Usage:"));
    }

    #[test]
    fn bad_interval_is_reported_not_defaulted() {
        for bad in [&["-u", "fast"][..], &["-u", "-1"], &["-u", "1.5"], &["-u"]] {
            let err = parse_args(args(bad)).unwrap_err();
            assert_eq!(err.exit_code(), 2, "{bad:?}");
        }
    }

    #[test]
    fn unknown_flag_is_an_error() {
        let err = parse_args(args(&["--frobnicate"])).unwrap_err();
        assert!(err.to_string().contains("--frobnicate"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn once_flag() {
        assert!(parse_args(args(&["--once"])).unwrap().once);
    }
}
