use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Destination for visualization artifacts, keyed by the 1-based epoch at
/// which they were produced. The destination is derived deterministically
/// from the key; write failures propagate and are fatal to the run.
pub trait VisualSink {
    type Artifact;

    fn put(
        &mut self,
        inputs: &Self::Artifact,
        samples: &Self::Artifact,
        epoch: usize,
    ) -> io::Result<()>;
}

/// Destination for checkpoint blobs, keyed the same way. A failed checkpoint
/// write is fatal rather than skipped: silent checkpoint loss would be
/// discovered only much later.
pub trait CheckpointSink {
    type State;

    fn put(&mut self, state: &Self::State, epoch: usize) -> io::Result<()>;
}

/// Writes one `grid-<epoch>.png` per fired interval under a fixed directory.
///
/// Grid rendering proper belongs to the model's artifact encoding; this sink
/// only persists the encoded input and sample panels back to back.
#[derive(Debug)]
pub struct FsVisualSink {
    dir: PathBuf,
}

impl FsVisualSink {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, epoch: usize) -> PathBuf {
        self.dir.join(format!("grid-{epoch}.png"))
    }
}

impl VisualSink for FsVisualSink {
    type Artifact = Vec<u8>;

    fn put(&mut self, inputs: &Vec<u8>, samples: &Vec<u8>, epoch: usize) -> io::Result<()> {
        let mut grid = Vec::with_capacity(inputs.len() + samples.len());
        grid.extend_from_slice(inputs);
        grid.extend_from_slice(samples);
        fs::write(self.path_for(epoch), grid)
    }
}

/// Writes one `<epoch>.ckpt` blob per fired interval under a fixed directory,
/// and reads blobs back for the restore path.
#[derive(Debug)]
pub struct FsCheckpointSink {
    dir: PathBuf,
}

impl FsCheckpointSink {
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, epoch: usize) -> PathBuf {
        self.dir.join(format!("{epoch}.ckpt"))
    }

    /// Reads the blob written for `epoch`.
    pub fn read(&self, epoch: usize) -> io::Result<Vec<u8>> {
        fs::read(self.path_for(epoch))
    }
}

impl CheckpointSink for FsCheckpointSink {
    type State = Vec<u8>;

    fn put(&mut self, state: &Vec<u8>, epoch: usize) -> io::Result<()> {
        fs::write(self.path_for(epoch), state)
    }
}

/// Reads a checkpoint blob from an arbitrary path, for restore invocations
/// that point outside the run's own output directory.
pub fn read_checkpoint(path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
    fs::read(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visual_sink_writes_keyed_grid_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsVisualSink::new(dir.path().join("figures")).unwrap();

        sink.put(&vec![1, 2], &vec![3, 4], 5).unwrap();

        let written = fs::read(dir.path().join("figures/grid-5.png")).unwrap();
        assert_eq!(written, vec![1, 2, 3, 4]);
    }

    #[test]
    fn checkpoint_sink_round_trips_blobs() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FsCheckpointSink::new(dir.path().join("checkpoints")).unwrap();

        sink.put(&vec![9, 8, 7], 12).unwrap();

        assert_eq!(sink.read(12).unwrap(), vec![9, 8, 7]);
        assert_eq!(
            read_checkpoint(dir.path().join("checkpoints/12.ckpt")).unwrap(),
            vec![9, 8, 7]
        );
    }

    #[test]
    fn missing_checkpoint_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FsCheckpointSink::new(dir.path()).unwrap();
        assert!(sink.read(3).is_err());
    }
}
