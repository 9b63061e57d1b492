use std::env;

use log::info;
use ndarray::array;
use rand::{SeedableRng, rngs::StdRng};

use param_optim::{
    config::TrainingConfig,
    model::{Dataset, LinearRegression},
    optimization::Optimizer,
};

const SAMPLES: usize = 256;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => {
            info!("reading config from {path}");
            TrainingConfig::from_path(&path)?
        }
        None => TrainingConfig::default(),
    };

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let weights = array![[1.5, -0.5], [-2.0, 0.25], [0.75, 1.0]];
    let bias = array![0.3, -0.7];
    let dataset = Dataset::linear(&mut rng, SAMPLES, weights.view(), bias.view());

    let mut model = LinearRegression::new(weights.nrows(), weights.ncols());
    let mut optimizer = config.optimizer.build()?;
    info!(
        "training {} parameters with {optimizer} for {} epochs",
        model.size(),
        config.epochs
    );

    for epoch in 0..config.epochs.get() {
        for batch in dataset.batches(&mut rng, config.batch_size) {
            optimizer.update(&mut model, Some(&batch));
        }

        let loss = model.loss(dataset.full());
        info!(epoch = epoch, loss = loss; "epoch finished");
    }

    info!("final weights: {}", model.weights());
    info!("final bias: {}", model.bias());

    Ok(())
}
