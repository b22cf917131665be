//! FloodGuard - 洪水水位监测后端服务

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use floodguard::{
    config::{LoggingSettings, Settings},
    handlers::SimulatorFlag,
    middleware::RequestLogger,
    models::ThresholdConfig,
    repositories::{InMemorySensorStore, ReadingRepository, SensorStore},
    routes,
    services::{build_notifier, SimulatorService, ThresholdService, WaterLevelService},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    // 加载配置
    let settings = Settings::load().expect("配置加载失败");

    // 初始化日志
    init_tracing(&settings.logging);

    info!("🌊 FloodGuard 服务启动中...");
    info!(
        min_threshold = settings.thresholds.min_threshold,
        max_threshold = settings.thresholds.max_threshold,
        "✅ 配置加载完成"
    );

    // 初始化存储
    let sensor_store: Arc<dyn SensorStore> = Arc::new(InMemorySensorStore::new());
    let reading_repo = ReadingRepository::new(settings.history.capacity);

    // 初始化服务
    let notifier = build_notifier(&settings).expect("通知服务初始化失败");
    let threshold_service = Arc::new(ThresholdService::new(ThresholdConfig::from(
        &settings.thresholds,
    )));
    let water_level_service = Arc::new(WaterLevelService::new(
        sensor_store,
        reading_repo,
        threshold_service.clone(),
        notifier,
        settings.calibration.clone(),
    ));

    if settings.simulator.enabled {
        let simulator = Arc::new(SimulatorService::new(
            settings.simulator.clone(),
            water_level_service.clone(),
        ));
        actix_rt::spawn(simulator.run());
    }

    let simulator_flag = SimulatorFlag(settings.simulator.enabled);
    let server_addr = settings.server_addr();
    let workers = if settings.server.workers == 0 {
        num_cpus::get()
    } else {
        settings.server.workers
    };

    info!("🚀 服务启动在 http://{}", server_addr);
    info!("📊 工作线程数: {}", workers);

    HttpServer::new(move || {
        // 设备端和看板都可能跨域访问
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT"])
            .allowed_headers(vec!["Content-Type", "X-Request-ID"])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(RequestLogger::new())
            .wrap(middleware::Compress::default())
            .app_data(web::Data::new(threshold_service.clone()))
            .app_data(web::Data::new(water_level_service.clone()))
            .app_data(web::Data::new(simulator_flag))
            .configure(routes::configure)
    })
    .workers(workers)
    .bind(&server_addr)?
    .run()
    .await
}

/// 初始化日志系统
fn init_tracing(logging: &LoggingSettings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}
