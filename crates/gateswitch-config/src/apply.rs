use tracing::debug;

use gateswitch_flag::{AggregateError, GateRegistry, GateSwitch};

use crate::model::Config;

impl Config {
    /// Apply every gate layer to the switch's registry, in precedence order.
    ///
    /// Rejections in one layer do not prevent later layers from applying. All
    /// of them come back as a single aggregate, in layer order.
    pub fn apply<R: GateRegistry + ?Sized>(
        &self,
        switch: &GateSwitch<'_, R>,
    ) -> Result<(), AggregateError<R::Error>> {
        let mut failures = Vec::new();
        for layer in &self.layers {
            let rejected = switch.apply_tokens(layer.tokens());
            debug!(
                source = %layer.source,
                value = %layer.value,
                rejected = rejected.len(),
                "Applied feature gate layer"
            );
            failures.extend(rejected);
        }
        AggregateError::check(failures)
    }
}
