//! Drives a whole run: prompt, simulation loop, end screen.

use std::thread;
use std::time::Duration;

use log::{error, info};

use crate::config::{Choice, Layout};
use crate::error::Result;
use crate::input::{InputReader, Mailbox};
use crate::render::{draw_end, draw_frame, draw_instructions};
use crate::screen::Surface;
use crate::session::{Applied, Phase, Session};
use crate::sound::{Cue, Speaker};
use crate::track::Spawner;

/// How long the end message stays up before a key can close it.
const END_PAUSE: Duration = Duration::from_secs(1);

pub fn run(
    surface: &mut impl Surface,
    layout: Layout,
    spawner: Spawner,
    speaker: &Speaker,
) -> Result<Phase> {
    surface.set_cursor_visible(false)?;

    draw_instructions(surface, layout);
    surface.present()?;
    let choice = loop {
        if let Some(choice) = Choice::from_key(surface.read_key()?) {
            break choice;
        }
    };

    let phase = match choice {
        Choice::Quit => Phase::Quit,
        Choice::Play(difficulty) => {
            info!("difficulty {difficulty:?}");
            match Session::new(layout, difficulty.pace(), spawner) {
                Ok(mut session) => play(&mut session, surface, layout, speaker)?,
                Err(e) => {
                    error!("{e}");
                    Phase::Errored
                }
            }
        }
    };

    draw_end(surface, layout, phase);
    surface.present()?;
    thread::sleep(END_PAUSE);
    surface.discard_pending_keys()?;
    surface.read_key()?;

    surface.set_cursor_visible(true)?;
    Ok(phase)
}

fn play(
    session: &mut Session,
    surface: &mut impl Surface,
    layout: Layout,
    speaker: &Speaker,
) -> Result<Phase> {
    let mailbox = Mailbox::new();
    let reader = InputReader::spawn(mailbox.clone())?;

    let looped = simulate(session, surface, layout, &mailbox, speaker);
    if let Err(e) = reader.stop() {
        error!("input reader: {e}");
        session.fail();
    }
    looped?;
    Ok(session.phase())
}

/// The fixed-rate loop: take input, scroll, draw, sleep. Returns once the
/// session has left `Running`.
pub fn simulate(
    session: &mut Session,
    surface: &mut impl Surface,
    layout: Layout,
    mailbox: &Mailbox,
    speaker: &Speaker,
) -> Result<()> {
    while session.is_running() {
        if let Some(command) = mailbox.take() {
            if session.apply(command) == Applied::Jumped {
                speaker.play(Cue::Jump);
            }
        }
        if !session.is_running() {
            break;
        }
        if mailbox.is_closed() {
            error!("keyboard reader is gone");
            session.fail();
            break;
        }

        match session.advance_one_step(surface) {
            Phase::Won => speaker.play(Cue::Finish),
            Phase::Lost => speaker.play(Cue::Crash),
            _ => {}
        }

        draw_frame(surface, layout, session);
        if let Err(e) = surface.present() {
            session.fail();
            return Err(e);
        }

        if session.is_running() {
            thread::sleep(session.tick_interval());
        }
    }
    Ok(())
}
