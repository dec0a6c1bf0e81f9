//! Terminal detection and the per-command UI context.

use std::io::IsTerminal;

use super::mode::{ListFormat, OutputMode};

/// Columns assumed when the terminal width is unknown.
const DEFAULT_WIDTH: usize = 80;
/// Narrowest width tables are laid out for.
const MIN_WIDTH: usize = 40;

/// What the process knows about where stdout goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    pub stdout_tty: bool,
    pub dumb: bool,
    pub no_color_env: bool,
    pub width: usize,
}

impl Terminal {
    /// Inspect stdout, `TERM`, `NO_COLOR` and `COLUMNS`.
    pub fn detect() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            dumb: std::env::var("TERM").is_ok_and(|term| term == "dumb"),
            no_color_env: std::env::var_os("NO_COLOR").is_some(),
            width: terminal_width().unwrap_or(DEFAULT_WIDTH),
        }
    }
}

/// Rendering settings for one command.
#[derive(Debug, Clone)]
pub struct UiContext {
    pub color: bool,
    pub unicode: bool,
    /// Table width in columns
    pub width: usize,
    pub mode: OutputMode,
}

impl UiContext {
    /// Combine the terminal with the global `--no-color`/`--ascii` flags and
    /// the command's own `--json`/`--format`.
    pub fn for_terminal(
        terminal: Terminal,
        json: bool,
        format: Option<ListFormat>,
        no_color: bool,
        ascii: bool,
    ) -> Self {
        let mode = OutputMode::resolve(json, format, terminal.stdout_tty, terminal.dumb);
        Self {
            // Color only ever decorates pretty output.
            color: mode.is_pretty() && !no_color && !terminal.no_color_env,
            unicode: !ascii,
            width: terminal.width.max(MIN_WIDTH),
            mode,
        }
    }
}

fn terminal_width() -> Option<usize> {
    if let Some(width) = std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.parse::<usize>().ok())
        .filter(|&width| width > 0)
    {
        return Some(width);
    }

    #[cfg(unix)]
    {
        use std::mem::MaybeUninit;

        let mut winsize = MaybeUninit::<libc::winsize>::uninit();
        // SAFETY: TIOCGWINSZ only writes into the provided winsize
        let result =
            unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, winsize.as_mut_ptr()) };
        if result == 0 {
            // SAFETY: ioctl succeeded, so winsize is initialized
            let ws = unsafe { winsize.assume_init() };
            if ws.ws_col > 0 {
                return Some(usize::from(ws.ws_col));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tty() -> Terminal {
        Terminal {
            stdout_tty: true,
            dumb: false,
            no_color_env: false,
            width: 120,
        }
    }

    #[test]
    fn test_terminal_gets_colored_tables() {
        let ctx = UiContext::for_terminal(tty(), false, None, false, false);
        assert_eq!(ctx.mode, OutputMode::Pretty);
        assert!(ctx.color);
        assert_eq!(ctx.width, 120);
    }

    #[test]
    fn test_pipe_gets_plain_without_color() {
        let piped = Terminal {
            stdout_tty: false,
            ..tty()
        };
        let ctx = UiContext::for_terminal(piped, false, Some(ListFormat::Table), false, false);
        assert_eq!(ctx.mode, OutputMode::Plain);
        assert!(!ctx.color);
    }

    #[test]
    fn test_no_color_sources() {
        let from_flag = UiContext::for_terminal(tty(), false, None, true, false);
        assert!(!from_flag.color);

        let env = Terminal {
            no_color_env: true,
            ..tty()
        };
        assert!(!UiContext::for_terminal(env, false, None, false, false).color);
    }

    #[test]
    fn test_ascii_and_narrow_width() {
        let narrow = Terminal { width: 12, ..tty() };
        let ctx = UiContext::for_terminal(narrow, false, None, false, true);
        assert!(!ctx.unicode);
        assert_eq!(ctx.width, MIN_WIDTH);
    }

    #[test]
    fn test_json_flag() {
        let ctx = UiContext::for_terminal(tty(), true, None, false, false);
        assert!(ctx.mode.is_json());
        assert!(!ctx.color);
    }
}
