use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use log::info;

use aquaculture_predictor::{
    Config, Dataset, FeatureSchema, PredictionService, data::LABEL_COLUMN, http,
};

#[actix_rt::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    info!("loading dataset from {}", config.dataset_path.display());

    let schema = FeatureSchema::water_quality();
    let dataset = Dataset::from_csv_path(&config.dataset_path, &schema, LABEL_COLUMN)
        .with_context(|| format!("failed to load {}", config.dataset_path.display()))?;
    info!("loaded {} samples", dataset.len());

    let (service, report) = PredictionService::train(&dataset, schema, &config.training)
        .context("failed to train the model")?;
    println!("Model Accuracy: {:.4}", report.accuracy);
    info!(
        "held-out accuracy {:.4} over {} samples ({} used for training)",
        report.accuracy, report.test_len, report.train_len
    );

    info!(
        "serving predictions over {}",
        service.schema().names().collect::<Vec<_>>().join(", ")
    );

    let service = web::Data::new(service);
    let addr = (config.host.clone(), config.port);
    info!("listening at {}:{}", addr.0, addr.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(http::cors())
            .app_data(service.clone())
            .configure(http::routes)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
