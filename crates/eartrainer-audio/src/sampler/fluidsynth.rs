//! `fluidsynth` subprocess backend.
//!
//! The request is written as a MIDI file into a temporary directory, rendered
//! to WAV with `fluidsynth -ni -g 1.0 -r <rate> -F <out.wav> <soundfont> <in.mid>`,
//! then decoded and fitted to the request's exact length.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

use super::midi::write_smf;
use super::SampleBackend;
use crate::config::{AudioConfig, DEFAULT_SAMPLER_TIMEOUT_SECS, ENV_FLUIDSYNTH_PATH};
use crate::error::{AudioError, AudioResult};
use crate::request::RenderRequest;
use crate::tone::{normalize_peak, num_samples, PEAK_AMPLITUDE};
use crate::wav::decode_wav_mono;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[cfg(windows)]
const INSTALL_LOCATIONS: &[&str] = &[r"C:\Program Files\FluidSynth\bin\fluidsynth.exe"];
#[cfg(target_os = "macos")]
const INSTALL_LOCATIONS: &[&str] = &["/opt/homebrew/bin/fluidsynth", "/usr/local/bin/fluidsynth"];
#[cfg(not(any(windows, target_os = "macos")))]
const INSTALL_LOCATIONS: &[&str] = &["/usr/bin/fluidsynth", "/usr/local/bin/fluidsynth"];

/// Configuration for the fluidsynth backend.
#[derive(Debug, Clone)]
pub struct FluidSynthConfig {
    /// Explicit executable path.
    pub executable: Option<PathBuf>,
    /// Soundfont (`.sf2`) to load.
    pub soundfont: Option<PathBuf>,
    /// Timeout for one render.
    pub timeout: Duration,
    /// Master gain passed with `-g`.
    pub gain: f64,
}

impl Default for FluidSynthConfig {
    fn default() -> Self {
        Self {
            executable: None,
            soundfont: None,
            timeout: Duration::from_secs(DEFAULT_SAMPLER_TIMEOUT_SECS),
            gain: 1.0,
        }
    }
}

impl FluidSynthConfig {
    /// Sets the soundfont path.
    pub fn soundfont(mut self, path: impl Into<PathBuf>) -> Self {
        self.soundfont = Some(path.into());
        self
    }

    /// Sets the executable path.
    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    /// Sets the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&AudioConfig> for FluidSynthConfig {
    fn from(config: &AudioConfig) -> Self {
        Self {
            executable: config.sampler_path.clone(),
            soundfont: config.soundfont_path.clone(),
            timeout: config.sampler_timeout,
            ..Default::default()
        }
    }
}

/// Renders requests by running `fluidsynth`.
#[derive(Debug, Clone, Default)]
pub struct FluidSynthBackend {
    config: FluidSynthConfig,
}

impl FluidSynthBackend {
    /// Creates a backend with the given configuration.
    pub fn with_config(config: FluidSynthConfig) -> Self {
        Self { config }
    }

    /// Places to look for the executable, in order: the configured path,
    /// `FLUIDSYNTH_PATH`, a `PATH` search, then the usual install locations.
    fn executable_candidates(&self) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = self.config.executable.iter().cloned().collect();
        candidates.extend(std::env::var_os(ENV_FLUIDSYNTH_PATH).map(PathBuf::from));
        candidates.extend(which::which("fluidsynth").ok());
        candidates.extend(INSTALL_LOCATIONS.iter().copied().map(PathBuf::from));
        candidates
    }

    /// First executable candidate that exists on disk.
    pub fn find_executable(&self) -> AudioResult<PathBuf> {
        self.executable_candidates()
            .into_iter()
            .find(|path| path.is_file())
            .ok_or(AudioError::SamplerNotFound)
    }

    /// The configured soundfont, if it exists on disk.
    pub fn soundfont(&self) -> AudioResult<&Path> {
        match self.config.soundfont.as_deref() {
            Some(path) if path.is_file() => Ok(path),
            other => Err(AudioError::SoundfontMissing {
                path: other.map(Path::to_path_buf),
            }),
        }
    }

    fn run(
        &self,
        executable: &Path,
        soundfont: &Path,
        midi: &Path,
        out: &Path,
        sample_rate: u32,
    ) -> AudioResult<()> {
        let mut cmd = Command::new(executable);
        cmd.arg("-ni")
            .arg("-g")
            .arg(format!("{:.1}", self.config.gain))
            .arg("-r")
            .arg(sample_rate.to_string())
            .arg("-F")
            .arg(out)
            .arg(soundfont)
            .arg(midi)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        debug!(executable = %executable.display(), "spawning fluidsynth");
        let child = cmd.spawn().map_err(AudioError::SamplerSpawn)?;
        let (status, stderr) = wait_for_render(child, self.config.timeout)?;

        if !status.success() {
            return Err(AudioError::sampler_failed(status.code().unwrap_or(-1), stderr));
        }
        Ok(())
    }
}

impl SampleBackend for FluidSynthBackend {
    fn name(&self) -> &'static str {
        "fluidsynth"
    }

    fn is_available(&self) -> bool {
        self.soundfont().is_ok() && self.find_executable().is_ok()
    }

    fn fingerprint(&self) -> String {
        match &self.config.soundfont {
            Some(path) => format!("{}:{}", self.name(), path.display()),
            None => self.name().to_string(),
        }
    }

    fn render(&self, request: &RenderRequest, sample_rate: u32) -> AudioResult<Vec<f64>> {
        let soundfont = self.soundfont()?;
        let executable = self.find_executable()?;

        let work_dir = tempfile::Builder::new()
            .prefix("eartrainer_fluidsynth_")
            .tempdir()?;
        let midi_path = work_dir.path().join("request.mid");
        let wav_path = work_dir.path().join("render.wav");

        let mut midi_file = std::fs::File::create(&midi_path)?;
        write_smf(&mut midi_file, &request.note_events())?;
        drop(midi_file);

        self.run(&executable, soundfont, &midi_path, &wav_path, sample_rate)?;

        let decoded = decode_wav_mono(std::io::BufReader::new(std::fs::File::open(&wav_path)?))?;
        let mut samples = decoded.samples;
        if samples.iter().all(|&s| s == 0.0) {
            return Err(AudioError::EmptyRender);
        }

        // Fluidsynth appends a release tail; cut or pad to the requested length.
        samples.resize(num_samples(request.total_duration_secs(), sample_rate), 0.0);
        normalize_peak(&mut samples, PEAK_AMPLITUDE);
        Ok(samples)
    }
}

/// Waits for the render to finish, killing it once `timeout` has passed.
///
/// Stderr is read on its own thread while the child runs, so a noisy child
/// never stalls on a full pipe.
fn wait_for_render(mut child: Child, timeout: Duration) -> AudioResult<(ExitStatus, String)> {
    let stderr = child.stderr.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut text = String::new();
            let _ = pipe.read_to_string(&mut text);
            text
        })
    });

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait().map_err(AudioError::SamplerSpawn)? {
            Some(status) => return Ok((status, collect_stderr(stderr))),
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                debug!(stderr = %collect_stderr(stderr), "fluidsynth killed after timeout");
                return Err(AudioError::SamplerTimeout {
                    timeout_secs: timeout.as_secs(),
                });
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    }
}

fn collect_stderr(reader: Option<JoinHandle<String>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eartrainer_theory::{Note, PitchClass};
    use tempfile::TempDir;

    fn request() -> RenderRequest {
        RenderRequest::Chord {
            notes: vec![Note::new(PitchClass::C, 4)],
            duration: 0.5,
        }
    }

    #[test]
    fn test_missing_soundfont_is_reported() {
        let backend = FluidSynthBackend::default();
        let err = backend.render(&request(), 44_100).unwrap_err();
        assert!(matches!(err, AudioError::SoundfontMissing { path: None }));
        assert!(!backend.is_available());
    }

    #[test]
    fn test_nonexistent_soundfont_is_reported() {
        let config = FluidSynthConfig::default().soundfont("/no/such/font.sf2");
        let backend = FluidSynthBackend::with_config(config);
        let err = backend.render(&request(), 44_100).unwrap_err();
        assert!(matches!(err, AudioError::SoundfontMissing { path: Some(_) }));
        assert!(err.is_sampler_error());
    }

    #[test]
    fn test_config_from_audio_config() {
        let audio = AudioConfig::default()
            .soundfont("/srv/piano.sf2")
            .sampler_path("/opt/fs")
            .sampler_timeout(Duration::from_secs(3));
        let config = FluidSynthConfig::from(&audio);
        assert_eq!(config.soundfont, Some(PathBuf::from("/srv/piano.sf2")));
        assert_eq!(config.executable, Some(PathBuf::from("/opt/fs")));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.gain, 1.0);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_executable_is_reported() {
        let dir = TempDir::new().unwrap();
        let soundfont = dir.path().join("font.sf2");
        std::fs::write(&soundfont, b"not really a soundfont").unwrap();

        let config = FluidSynthConfig::default()
            .soundfont(&soundfont)
            .executable("/bin/false");
        let backend = FluidSynthBackend::with_config(config);
        if !Path::new("/bin/false").exists() {
            return;
        }
        let err = backend.render(&request(), 8_000).unwrap_err();
        assert!(matches!(err, AudioError::SamplerFailed { .. }));
    }

    #[test]
    fn test_configured_executable_comes_first() {
        let dir = TempDir::new().unwrap();
        let exe = dir.path().join("fluidsynth");
        std::fs::write(&exe, b"").unwrap();

        let backend = FluidSynthBackend::with_config(FluidSynthConfig::default().executable(&exe));
        assert_eq!(backend.executable_candidates()[0], exe);
        assert_eq!(backend.find_executable().unwrap(), exe);
    }

    #[test]
    fn test_fingerprint_names_soundfont() {
        let backend = FluidSynthBackend::with_config(FluidSynthConfig::default().soundfont("/srv/piano.sf2"));
        assert_eq!(backend.fingerprint(), "fluidsynth:/srv/piano.sf2");
        assert_eq!(FluidSynthBackend::default().fingerprint(), "fluidsynth");
    }

    #[cfg(unix)]
    #[test]
    fn test_noisy_stderr_does_not_stall_until_timeout() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let script = dir.path().join("noisy.sh");
        std::fs::write(
            &script,
            "#!/bin/sh\nhead -c 262144 /dev/zero | tr '\\000' x >&2\nexit 3\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let child = Command::new(&script)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        let started = Instant::now();
        let (status, stderr) = wait_for_render(child, Duration::from_secs(20)).unwrap();

        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(status.code(), Some(3));
        assert_eq!(stderr.len(), 262_144);
    }
}
