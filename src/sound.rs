//! Beeps. Only built with the `sound` feature; otherwise every cue is silent.

use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Crash,
    Finish,
}

pub struct Speaker {
    #[cfg(feature = "sound")]
    out: Option<backend::Output>,
}

impl Speaker {
    /// Opens the default audio device. A missing device leaves the speaker
    /// muted rather than failing the game.
    pub fn open() -> Self {
        Speaker {
            #[cfg(feature = "sound")]
            out: backend::Output::open(),
        }
    }

    pub fn play(&self, cue: Cue) {
        debug!("cue {cue:?}");
        self.emit(cue);
    }

    #[cfg(feature = "sound")]
    fn emit(&self, cue: Cue) {
        if let Some(out) = &self.out {
            out.play(cue);
        }
    }

    #[cfg(not(feature = "sound"))]
    fn emit(&self, _: Cue) {}
}

#[cfg(feature = "sound")]
mod backend {
    use std::time::Duration;

    use log::warn;
    use rodio::cpal::SampleRate;
    use rodio::source::{SineWave, chirp};
    use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

    use super::Cue;

    const RATE: SampleRate = SampleRate(48_000);
    const GAIN: f32 = 0.15;

    pub struct Output {
        // Playback stops when the stream is dropped.
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl Output {
        pub fn open() -> Option<Self> {
            match OutputStream::try_default() {
                Ok((stream, handle)) => Some(Output {
                    _stream: stream,
                    handle,
                }),
                Err(e) => {
                    warn!("no audio output, playing silent: {e}");
                    None
                }
            }
        }

        pub fn play(&self, cue: Cue) {
            let sink = match Sink::try_new(&self.handle) {
                Ok(sink) => sink,
                Err(e) => {
                    warn!("cannot play {cue:?}: {e}");
                    return;
                }
            };
            match cue {
                // Short rising blip.
                Cue::Jump => sink.append(
                    chirp(RATE, 300.0, 700.0, Duration::from_millis(120)).amplify(GAIN),
                ),
                // 400Hz down to 80Hz.
                Cue::Crash => sink.append(
                    chirp(RATE, 400.0, 80.0, Duration::from_millis(400)).amplify(GAIN),
                ),
                Cue::Finish => {
                    let low = SineWave::new(660.0).take_duration(Duration::from_millis(150));
                    let high = SineWave::new(880.0)
                        .take_duration(Duration::from_millis(250))
                        .delay(Duration::from_millis(150));
                    sink.append(low.mix(high).amplify(GAIN));
                }
            }
            sink.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cues_play_without_a_device() {
        let speaker = Speaker::open();
        speaker.play(Cue::Jump);
        speaker.play(Cue::Crash);
        speaker.play(Cue::Finish);
    }
}
