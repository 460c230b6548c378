//! Output formatting for the non-interactive commands

use crate::glossary::Glossary;
use crate::view::{SpanStyle, View};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Print a view to stdout, ripgrep-style colors for matches
pub fn print_view(view: &View, choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    write_view(&mut stdout, view)
}

/// Write a view with headings in bold and matches in bold red
pub fn write_view<W: WriteColor>(out: &mut W, view: &View) -> io::Result<()> {
    for span in view.spans() {
        match span.style {
            SpanStyle::Plain => {
                write!(out, "{}", span.text)?;
            }
            SpanStyle::Heading => {
                out.set_color(ColorSpec::new().set_bold(true))?;
                write!(out, "{}", span.text)?;
                out.reset()?;
            }
            SpanStyle::Match => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
                write!(out, "{}", span.text)?;
                out.reset()?;
            }
        }
    }

    // Views from incremental search already end in a blank line
    if !view.plain_text().ends_with('\n') {
        writeln!(out)?;
    }

    Ok(())
}

/// Print topic titles, one per line (for `list`)
pub fn print_titles(glossary: &Glossary, choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);

    for title in glossary.titles() {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(stdout, "{}", title)?;
        stdout.reset()?;
        writeln!(stdout)?;
    }

    Ok(())
}

/// Print a view as JSON (for `--json`)
pub fn print_json(view: &View) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, view)?;
    writeln!(lock)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{incremental_search, select_topic};
    use termcolor::Buffer;

    #[test]
    fn test_write_view_plain() {
        let glossary = Glossary::builtin();
        let view = select_topic(&glossary, "Меню в интерфейсах").unwrap();

        let mut buf = Buffer::no_color();
        write_view(&mut buf, &view).unwrap();

        let out = String::from_utf8(buf.into_inner()).unwrap();
        assert_eq!(
            out,
            "📘 Меню в интерфейсах\n\nМеню представляют собой иерархию пунктов, позволяющих пользователю выбирать команды.\n"
        );
    }

    #[test]
    fn test_write_view_colors_matches() {
        let glossary = Glossary::builtin();
        let view = incremental_search(&glossary, "GUI");

        let mut buf = Buffer::ansi();
        write_view(&mut buf, &view).unwrap();

        let out = String::from_utf8(buf.into_inner()).unwrap();
        assert!(out.contains("\x1b[31mGUI\x1b[0m"));
        assert!(out.ends_with("\n\n"));
    }
}
