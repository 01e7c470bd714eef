use super::{DiffLine, DiffTag};
use colored::Colorize;
use std::io::{self, Write};

/// Write a single diff entry followed by a newline.
///
/// Additions are green and removals red when `colorize` is set.
///
/// # Errors
///
/// Returns an error if writing to the output writer fails.
pub fn write_diff_line(line: &DiffLine, colorize: bool, writer: &mut dyn Write) -> io::Result<()> {
    let rendered = line.to_string();
    if colorize {
        match line.tag {
            DiffTag::Added => writeln!(writer, "{}", rendered.green()),
            DiffTag::Removed => writeln!(writer, "{}", rendered.red()),
        }
    } else {
        writeln!(writer, "{rendered}")
    }
}

/// Write every entry of `diff`, in order.
///
/// # Errors
///
/// Returns an error if writing to the output writer fails.
pub fn write_diff(diff: &[DiffLine], colorize: bool, writer: &mut dyn Write) -> io::Result<()> {
    for line in diff {
        write_diff_line(line, colorize, writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rendering() -> anyhow::Result<()> {
        let diff = vec![DiffLine::removed("old"), DiffLine::added("new")];
        let mut output = Vec::new();

        write_diff(&diff, false, &mut output)?;

        assert_eq!(String::from_utf8(output)?, "- old\n+ new\n");
        Ok(())
    }

    #[test]
    fn test_colorized_rendering_keeps_text() -> anyhow::Result<()> {
        colored::control::set_override(true);
        let mut output = Vec::new();

        write_diff_line(&DiffLine::added("line 4"), true, &mut output)?;
        colored::control::unset_override();

        let result = String::from_utf8(output)?;
        assert!(result.contains("+ line 4"));
        assert!(result.contains("\u{1b}["));
        Ok(())
    }

    #[test]
    fn test_empty_diff_writes_nothing() -> anyhow::Result<()> {
        let mut output = Vec::new();
        write_diff(&[], true, &mut output)?;
        assert!(output.is_empty());
        Ok(())
    }
}
