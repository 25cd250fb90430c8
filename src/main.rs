// ==========================================
// 产品主数据管理系统 - 服务主入口
// ==========================================
// 技术栈: actix-web + Rust + SQLite
// 系统定位: 内部数据录入工具
// ==========================================

use actix_web::{web, App, HttpServer};
use master_sheet::config::AppConfig;
use master_sheet::{db, logging, server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", master_sheet::APP_NAME);
    tracing::info!("系统版本: {}", master_sheet::VERSION);
    tracing::info!("==================================================");

    // 解析配置
    let config = AppConfig::from_env();
    tracing::info!("使用数据库: {}", config.db_path);

    // 初始化数据库 schema（幂等）
    db::init_database(&config.db_path).expect("数据库初始化失败");

    let bind_addr = (config.host.clone(), config.port);
    tracing::info!("服务启动于 http://{}:{}", config.host, config.port);

    let app_config = config.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_config.clone()))
            .service(server::configure_routes())
            .default_service(web::route().to(server::serve_embedded))
    })
    // 单工作线程：每个用户操作串行运行至完成（与数据录入场景一致）
    .workers(1)
    .bind(bind_addr)?
    .run()
    .await
}
