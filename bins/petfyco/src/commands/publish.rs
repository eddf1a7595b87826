//! Publish command

use crate::context::AppContext;
use anyhow::Result;
use clap::builder::{PossibleValuesParser, TypedValueParser};
use petfyco_app::{PublishView, Species};
use petfyco_telemetry::Timer;

/// Accepts exactly the species the form offers
pub fn species_parser() -> impl TypedValueParser<Value = Species> {
    PossibleValuesParser::new(Species::ALL.map(Species::as_str)).try_map(|value| value.parse::<Species>())
}

/// Publish one pet as the signed-in user
pub async fn run(ctx: &AppContext, nombre: &str, especie: Species, estado: &str) -> Result<i32> {
    let client_config = ctx.client_config()?;
    let table = client_config.pets_table.clone();
    let mut view = PublishView::new(ctx.backend_with(client_config)?).with_table(&table);
    view.set_nombre(nombre);
    view.set_especie(especie);
    view.set_estado(estado);

    let spinner = ctx.spinner("Publishing...");
    let timer = Timer::start("publish");
    let outcome = view.submit().await;
    timer.stop();
    spinner.finish_and_clear();

    super::report(ctx, outcome, view.message().unwrap_or_default())
}
