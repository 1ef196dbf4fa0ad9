use std::{env, io};

use log::info;

use trainer::{
    RunConfig, RunMode, TrainingRun,
    data::{InMemoryBatches, batchify},
    demo::{ToyModel, ToySgd, synthetic_samples},
    restore,
    sink::{FsCheckpointSink, FsVisualSink, read_checkpoint},
};

const TRAIN_SAMPLES: usize = 512;
const HELD_OUT_SAMPLES: usize = 128;

fn main() -> io::Result<()> {
    env_logger::init();

    let cfg = match env::args().nth(1) {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };

    match cfg.mode.clone() {
        RunMode::Restore { checkpoint } => {
            let blob = read_checkpoint(&checkpoint)?;
            let mut model = ToyModel::new();
            restore(&mut model, blob).map_err(io::Error::from)?;
            info!(
                "restored parameters from {} (mu = {:.4}); no epochs run",
                checkpoint.display(),
                model.mu()
            );
        }
        RunMode::Train => {
            let seed = cfg.seed.unwrap_or(0);
            let train = InMemoryBatches::shuffled(
                batchify(&synthetic_samples(TRAIN_SAMPLES, seed), cfg.batch_size),
                cfg.seed,
            );
            let held_out = InMemoryBatches::fixed(batchify(
                &synthetic_samples(HELD_OUT_SAMPLES, seed.wrapping_add(1)),
                cfg.batch_size,
            ));

            let viz_sink = FsVisualSink::new(cfg.output_dir.join("figures"))?;
            let ckpt_sink = FsCheckpointSink::new(cfg.output_dir.join("checkpoints"))?;

            let run = TrainingRun::new(
                ToyModel::new(),
                ToySgd::new(1e-2),
                train,
                held_out,
                viz_sink,
                ckpt_sink,
                cfg.epochs,
                cfg.viz_interval,
                cfg.save_interval,
            );

            let report = run.run().map_err(io::Error::from)?;
            info!(
                "completed {} epoch(s), final VLB {:.3}, coefficient {:e}",
                report.bounds.len(),
                report.bounds.last().copied().unwrap_or(0.0),
                report.coefficient
            );
        }
    }

    Ok(())
}
