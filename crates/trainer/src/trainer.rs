//! Random forest trainer
//!
//! Fits the feature pipeline and a `smartcore` forest on the training split
//! and scores the held-out split.

use discharge_model::{
    labels, FeaturePipeline, FittedModel, Forest, ForestParams, ModelInput, TrainingConfig,
    UnknownCategoryPolicy,
};
use tracing::{debug, info};

use crate::context::TrainingContext;
use crate::dataset::Dataset;
use crate::errors::TrainerError;
use crate::evaluation::RegressionMetrics;

/// Result of a training run, before persistence
#[derive(Debug)]
pub struct TrainingOutcome {
    pub model: FittedModel,
    pub metrics: RegressionMetrics,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Length-of-stay trainer
#[derive(Clone, Debug)]
pub struct ModelTrainer {
    context: TrainingContext,
    forest: ForestParams,
    unknown_category: UnknownCategoryPolicy,
    test_fraction: f64,
}

impl ModelTrainer {
    pub fn new(
        context: TrainingContext,
        forest: ForestParams,
        unknown_category: UnknownCategoryPolicy,
        test_fraction: f64,
    ) -> Self {
        Self {
            context,
            forest,
            unknown_category,
            test_fraction,
        }
    }

    pub fn from_config(config: &TrainingConfig) -> Self {
        Self::new(
            TrainingContext::new(config.seed),
            config.forest(),
            config.unknown_category,
            config.test_fraction,
        )
    }

    pub fn context(&self) -> &TrainingContext {
        &self.context
    }

    pub fn forest(&self) -> ForestParams {
        self.forest
    }

    /// Split, fit and evaluate
    pub fn train(&self, dataset: &Dataset) -> Result<TrainingOutcome, TrainerError> {
        info!("Splitting data...");
        let split = dataset.split(&self.context, self.test_fraction)?;
        info!(
            "  Train rows: {}, test rows: {}",
            split.train.len(),
            split.test.len()
        );

        let model = self.fit(&split.train)?;

        info!("Evaluating model...");
        let metrics = self.evaluate(&model, &split.test)?;

        Ok(TrainingOutcome {
            model,
            metrics,
            train_rows: split.train.len(),
            test_rows: split.test.len(),
        })
    }

    /// Fit encoders and forest on training records only
    pub fn fit(&self, train: &[ModelInput]) -> Result<FittedModel, TrainerError> {
        info!("Building training pipeline...");
        let pipeline = FeaturePipeline::fit(train, self.unknown_category);
        debug!("Features: {:?}", pipeline.feature_names());

        let x = pipeline.transform_batch(train)?;
        let y = labels(train);

        info!(
            "Training model ({} trees, max depth {}, min {} samples per leaf)...",
            self.forest.trees, self.forest.max_depth, self.forest.min_samples_leaf
        );
        let forest = Forest::fit(&x, &y, self.forest.to_parameters(self.context.seed()))
            .map_err(|err| TrainerError::Training(err.to_string()))?;

        Ok(FittedModel::new(pipeline, forest))
    }

    /// Score a fitted model against labeled records
    ///
    /// Held-out categories missing from the training vocabulary are scored
    /// as all-zero indicators whatever the serving policy.
    pub fn evaluate(
        &self,
        model: &FittedModel,
        test: &[ModelInput],
    ) -> Result<RegressionMetrics, TrainerError> {
        let predicted = model.predict_batch_with(test, UnknownCategoryPolicy::Zeros)?;
        RegressionMetrics::compute(&labels(test), &predicted)
    }
}
