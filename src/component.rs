//! Search component trait.
//!
//! A request pipeline calls [`SearchComponent::process`] once per local
//! request. A distributed orchestrator calls
//! [`SearchComponent::distributed_process`] at each [`Stage`]; components
//! queue sub-requests on the context and report the next stage they need.

use crate::error::Result;
use crate::request::{RequestContext, Stage};

pub trait SearchComponent: Send + Sync + std::fmt::Debug {
    /// Short name, also used as the enabling request parameter.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Inspect the request before any component processes it.
    fn prepare(&self, ctx: &mut RequestContext) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Do the local work for a request and add output to `ctx.response`.
    fn process(&self, ctx: &mut RequestContext) -> Result<()>;

    /// Handle one stage of a distributed request.
    ///
    /// Returns the next stage this component needs to run at, or
    /// [`Stage::Done`] when it has nothing more to do.
    fn distributed_process(&self, ctx: &mut RequestContext) -> Result<Stage> {
        let _ = ctx;
        Ok(Stage::Done)
    }
}
