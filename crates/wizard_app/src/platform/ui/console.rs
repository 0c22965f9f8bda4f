use std::io::{self, Write};

use wizard_core::AlertStatus;

use super::render::{Control, SurfaceCommand};

/// Where rendered form commands end up.
pub trait FormSurface {
    fn apply(&mut self, command: SurfaceCommand) -> io::Result<()>;

    /// Out-of-band text such as help or input errors.
    fn notice(&mut self, text: &str) -> io::Result<()>;

    fn apply_all(&mut self, commands: Vec<SurfaceCommand>) -> io::Result<()> {
        for command in commands {
            self.apply(command)?;
        }
        Ok(())
    }
}

/// Plain-text form on a terminal or any other writer.
pub struct ConsoleSurface<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FormSurface for ConsoleSurface<W> {
    fn apply(&mut self, command: SurfaceCommand) -> io::Result<()> {
        match command {
            SurfaceCommand::SetStepActive {
                heading, active, ..
            } => {
                if active {
                    writeln!(self.out)?;
                    writeln!(self.out, "== {heading} ==")?;
                }
            }
            SurfaceCommand::SetFieldValue {
                key,
                label,
                value,
                invalid,
            } => {
                let marker = if invalid { "!" } else { " " };
                let shown = if value.is_empty() { "_" } else { value.as_str() };
                writeln!(self.out, "{marker} {label} ({key}): {shown}")?;
            }
            SurfaceCommand::SetUploadStatus { encoding, ready } => {
                if encoding {
                    writeln!(self.out, "    (encoding photo ID...)")?;
                } else if ready {
                    writeln!(self.out, "    (photo ID ready)")?;
                }
            }
            SurfaceCommand::ShowReview { sections } => {
                writeln!(self.out, "-- Review --")?;
                for section in sections {
                    writeln!(self.out, "  {} [:edit {}]", section.title, section.step + 1)?;
                    for entry in section.entries {
                        writeln!(self.out, "    {}: {}", entry.label, entry.value)?;
                    }
                }
            }
            SurfaceCommand::SetControl {
                control,
                visible,
                enabled,
            } => {
                if visible {
                    let name = match control {
                        Control::Back => ":back",
                        Control::Next => ":next",
                        Control::Submit => ":submit",
                    };
                    let state = if enabled { "" } else { " (disabled)" };
                    writeln!(self.out, "  [{name}{state}]")?;
                }
            }
            SurfaceCommand::SetAlert { status, messages } => {
                let tag = match status {
                    Some(AlertStatus::Pending) => "...",
                    Some(AlertStatus::Valid) => "OK",
                    Some(AlertStatus::Invalid) => "ERROR",
                    None => return self.out.flush(),
                };
                for message in messages {
                    writeln!(self.out, "[{tag}] {message}")?;
                }
            }
        }
        self.out.flush()
    }

    fn notice(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}
