use crate::model::CrateModel;
use crate::policy::EffectiveConfig;
use shimguard_types::Finding;

mod canonical_exists;
mod explicit;
mod no_chain;
mod no_fork;
mod utils;

#[cfg(test)]
mod tests;

pub fn run_all(model: &CrateModel, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    explicit::run(model, cfg, out);
    canonical_exists::run(model, cfg, out);
    no_fork::run(model, cfg, out);
    no_chain::run(model, cfg, out);
}
