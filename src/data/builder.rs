use crate::data::{Dataset, Sample};

/// Extension trait giving [`Dataset`] a builder entry point
pub trait DatasetBuilderExt {
    fn builder() -> DatasetBuilder;
}

impl DatasetBuilderExt for Dataset {
    fn builder() -> DatasetBuilder {
        DatasetBuilder {
            samples: Vec::new(),
        }
    }
}

/// Incremental builder for assembling a [`Dataset`] sample by sample
pub struct DatasetBuilder {
    samples: Vec<Sample>,
}

impl DatasetBuilder {
    /// Append one `(x1, x2, y)` observation
    pub fn sample(mut self, x1: f64, x2: f64, y: f64) -> Self {
        self.samples.push(Sample::new(x1, x2, y));
        self
    }

    /// Append every sample of an existing dataset
    pub fn extend(mut self, data: &Dataset) -> Self {
        self.samples.extend_from_slice(data.samples());
        self
    }

    pub fn build(self) -> Dataset {
        Dataset::new(self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_a_dataset() {
        let data = Dataset::builder()
            .sample(1.0, 0.5, 2.0)
            .sample(2.0, -0.5, 3.0)
            .build();
        assert_eq!(data.len(), 2);
        assert_eq!(data.samples()[1].x2, -0.5);
    }

    #[test]
    fn extend_appends_in_order() {
        let base = Dataset::builder().sample(1.0, 1.0, 1.0).build();
        let data = Dataset::builder()
            .sample(0.0, 0.0, 0.0)
            .extend(&base)
            .build();
        assert_eq!(data.len(), 2);
        assert_eq!(data.samples()[1].x1, 1.0);
    }
}
