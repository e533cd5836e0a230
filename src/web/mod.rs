pub mod api;

use std::sync::Arc;

use actix_web::{App, HttpServer, web::Data};

use crate::network::device_control::{DeviceController, RemoteControl};

/// Serve the control API until the server is shut down
pub async fn serve(host: &str, port: u16, remote: Arc<dyn RemoteControl>) -> std::io::Result<()> {
    let controller = DeviceController::new(remote);
    tracing::info!(host, port, "starting web server");

    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(controller.clone()))
            .configure(api::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
