//! Line-based terminal screens for setup, reveal and discussion.
//!
//! A terminal has no press-and-hold, so a hold is typed: `h` + Enter shows
//! the card and the next Enter hides it again. Every way out of the hold
//! prompt, end of input included, hides the card before anything else.
//!
//! The game runs on the alternate screen, and hiding a card also purges the
//! scrollback, so a word cannot be scrolled back into view by the next
//! player.

use std::io::{BufRead, Write};

use chhalkapat_core::clock::Clock;
use chhalkapat_core::error::DomainError;
use chhalkapat_core::rng::DeterministicRng;
use chhalkapat_game::application::command_handlers::{
    handle_advance, handle_configure, handle_hold_reveal, handle_reset, handle_start_game,
};
use chhalkapat_game::application::query_handlers::{get_discussion, get_reveal_card};
use chhalkapat_game::domain::commands::{Advance, Configure, HoldReveal, Reset, StartGame};
use chhalkapat_game::domain::configuration::{
    MAX_PLAYERS, MIN_IMPOSTERS, MIN_PLAYERS, max_imposters,
};
use chhalkapat_game::domain::reveal::CardFace;
use chhalkapat_game::domain::session::{Session, SessionPhase};
use chhalkapat_game::domain::word_pool::WordPool;
use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;

/// Whether the main loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Keyboard in, screen out.
#[derive(Debug)]
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Wraps an input and an output stream.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the terminal, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `text` without a newline and reads one line. `None` at end of
    /// input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn line(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn enter(&mut self) -> Result<(), AppError> {
        execute!(self.output, EnterAlternateScreen)?;
        Ok(())
    }

    /// Clears the game off the alternate screen and returns to the shell.
    fn leave(&mut self) -> Result<(), AppError> {
        self.clear()?;
        execute!(self.output, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Wipes the screen and then the scrollback behind it.
    fn clear(&mut self) -> Result<(), AppError> {
        queue!(
            self.output,
            Clear(ClearType::All),
            Clear(ClearType::Purge),
            MoveTo(0, 0)
        )?;
        self.output.flush()?;
        Ok(())
    }
}

/// Everything a session needs besides the session itself.
pub struct Table<'a> {
    /// Candidate secret words.
    pub pool: &'a WordPool,
    /// Randomness for dealing.
    pub rng: &'a mut dyn DeterministicRng,
    /// Event timestamps.
    pub clock: &'a dyn Clock,
}

/// Runs screens until the players quit or input ends.
///
/// # Errors
///
/// Returns `AppError::Io` if the terminal fails, or `AppError::Domain` for
/// a rule violation the screens cannot recover from.
pub fn run<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    session: &mut Session,
    table: &mut Table<'_>,
) -> Result<(), AppError> {
    terminal.enter()?;

    let res = play_screens(terminal, session, table);

    // Leave even when a screen failed; the screen error wins.
    let left = terminal.leave();
    res.and(left)
}

fn play_screens<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    session: &mut Session,
    table: &mut Table<'_>,
) -> Result<(), AppError> {
    loop {
        let flow = match session.phase() {
            SessionPhase::Setup => setup_screen(terminal, session, table)?,
            SessionPhase::Revealing => reveal_screen(terminal, session, table.clock)?,
            SessionPhase::Discussion => discussion_screen(terminal, session, table.clock)?,
        };
        if flow == Flow::Quit {
            info!(session_id = %session.id, "players left the table");
            return Ok(());
        }
    }
}

fn setup_screen<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    session: &mut Session,
    table: &mut Table<'_>,
) -> Result<Flow, AppError> {
    terminal.clear()?;
    terminal.line("ChhalKapat")?;
    terminal.line("Find the imposter among you!")?;
    terminal.line("")?;

    let current = session.draft_mut()?.player_count();
    let Some(raw) = terminal.prompt(&format!(
        "Number of players ({MIN_PLAYERS}-{MAX_PLAYERS}) [{current}]: "
    ))?
    else {
        return Ok(Flow::Quit);
    };
    if !raw.is_empty() {
        session.draft_mut()?.set_player_count_input(&raw);
    }

    let draft = session.draft_mut()?;
    let (player_count, current) = (draft.player_count(), draft.imposter_count());
    let Some(raw) = terminal.prompt(&format!(
        "Number of imposters ({MIN_IMPOSTERS}-{}) [{current}]: ",
        max_imposters(player_count)
    ))?
    else {
        return Ok(Flow::Quit);
    };
    if !raw.is_empty() {
        session.draft_mut()?.set_imposter_count_input(&raw);
    }

    terminal.line("Player Names")?;
    let slots: Vec<usize> = (0..player_count).collect();
    if prompt_names(terminal, session, &slots)? == Flow::Quit {
        return Ok(Flow::Quit);
    }

    let configuration = loop {
        let draft = session.draft_mut()?;
        let command = Configure {
            correlation_id: Uuid::new_v4(),
            player_count: draft.player_count(),
            imposter_count: draft.imposter_count(),
            player_names: draft.player_names().to_vec(),
        };
        match handle_configure(&command, session, table.clock) {
            Ok((configuration, _)) => break configuration,
            Err(DomainError::IncompleteNames { blank_slots }) => {
                terminal.line("Please enter names for all players!")?;
                if prompt_names(terminal, session, &blank_slots)? == Flow::Quit {
                    return Ok(Flow::Quit);
                }
            }
            Err(other) => return Err(other.into()),
        }
    };

    handle_start_game(
        &StartGame {
            correlation_id: Uuid::new_v4(),
            configuration,
        },
        session,
        table.pool,
        &mut *table.rng,
        table.clock,
    )?;
    Ok(Flow::Continue)
}

/// Asks for the names of `slots`. An empty answer keeps what the seat
/// already has.
fn prompt_names<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    session: &mut Session,
    slots: &[usize],
) -> Result<Flow, AppError> {
    for &slot in slots {
        let existing = session.draft_mut()?.player_names()[slot].clone();
        let prompt = if existing.trim().is_empty() {
            format!("Player {}: ", slot + 1)
        } else {
            format!("Player {} [{existing}]: ", slot + 1)
        };
        let Some(name) = terminal.prompt(&prompt)? else {
            return Ok(Flow::Quit);
        };
        if !name.is_empty() {
            session.draft_mut()?.set_player_name(slot, name)?;
        }
    }
    Ok(Flow::Continue)
}

fn hold(session: &mut Session, visible: bool) -> Result<(), AppError> {
    handle_hold_reveal(
        &HoldReveal {
            correlation_id: Uuid::new_v4(),
            visible,
        },
        session,
    )?;
    Ok(())
}

fn reveal_screen<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    session: &mut Session,
    clock: &dyn Clock,
) -> Result<Flow, AppError> {
    let card = get_reveal_card(session)?;
    let (position, total, is_last) = (card.position, card.total, card.is_last);
    let name = card.name.to_owned();

    terminal.clear()?;
    terminal.line(&format!("Player {position} of {total}"))?;
    terminal.line(&name)?;
    terminal.line("")?;
    terminal.line("Hold to reveal your word: type h and press Enter.")?;
    let next_label = if is_last { "Start Game" } else { "Next Player" };
    terminal.line(&format!("Type n and press Enter for {next_label}."))?;

    let Some(choice) = terminal.prompt("> ")? else {
        return Ok(Flow::Quit);
    };

    match choice.as_str() {
        "h" | "H" => {
            hold(session, true)?;
            if let CardFace::Shown { word, is_imposter } = get_reveal_card(session)?.face {
                let (word, is_imposter) = (word.to_owned(), is_imposter);
                terminal.line("")?;
                terminal.line(&format!("    {word}"))?;
                if is_imposter {
                    terminal.line("    You are the imposter!")?;
                }
                terminal.line("")?;
            }
            let released = terminal.prompt("Press Enter to hide.");
            hold(session, false)?;
            terminal.clear()?;
            if released?.is_none() {
                return Ok(Flow::Quit);
            }
        }
        "n" | "N" => {
            handle_advance(
                &Advance {
                    correlation_id: Uuid::new_v4(),
                },
                session,
                clock,
            )?;
        }
        other => warn!(input = other, "unrecognised reveal input"),
    }
    Ok(Flow::Continue)
}

fn discussion_screen<R: BufRead, W: Write>(
    terminal: &mut Terminal<R, W>,
    session: &mut Session,
    clock: &dyn Clock,
) -> Result<Flow, AppError> {
    let view = get_discussion(session)?;
    let plural = if view.imposter_count > 1 { "s" } else { "" };

    terminal.clear()?;
    terminal.line("Game Started!")?;
    terminal.line(&format!("{} imposter{plural} among you", view.imposter_count))?;
    terminal.line(&format!("{} starts the discussion!", view.starting_player))?;
    terminal.line("")?;
    terminal.line(
        "Discuss and figure out who the imposter is! The imposter doesn't know the word.",
    )?;

    let Some(choice) = terminal.prompt("Type r for a new game or q to quit: ")? else {
        return Ok(Flow::Quit);
    };
    match choice.as_str() {
        "r" | "R" => {
            handle_reset(
                &Reset {
                    correlation_id: Uuid::new_v4(),
                },
                session,
                clock,
            )?;
            Ok(Flow::Continue)
        }
        "q" | "Q" => Ok(Flow::Quit),
        _ => Ok(Flow::Continue),
    }
}
