use actix_web::error::BlockingError;
use actix_web::web::{self, Data, Path};
use actix_web::{HttpResponse, Responder, get};
use serde::{Deserialize, Serialize};

use crate::network::device_control::{ControlError, DeviceController};

/// Body sent with every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
    pub causes: Vec<String>,
}

impl From<&ControlError> for ErrorResponse {
    fn from(err: &ControlError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind().to_string(),
            causes: err.causes(),
        }
    }
}

/// Register every route. Literal segments must precede `{port}` captures.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(power_on)
        .service(standby)
        .service(get_power)
        .service(get_input)
        .service(get_input_list)
        .service(switch_input)
        .service(get_active_signal)
        .service(volume_up)
        .service(volume_down)
        .service(get_mute)
        .service(mute)
        .service(unmute)
        .service(get_volume)
        .service(set_volume)
        .service(blank_display)
        .service(unblank_display)
        .service(get_blank)
        .service(get_hardware_info)
        .service(send_remote_key);
}

fn respond<T: Serialize>(result: Result<Result<T, ControlError>, BlockingError>) -> HttpResponse {
    match result {
        Ok(Ok(body)) => HttpResponse::Ok().json(body),
        Ok(Err(err)) => {
            tracing::error!(error = %err, causes = ?err.causes(), "device request failed");
            HttpResponse::InternalServerError().json(ErrorResponse::from(&err))
        }
        Err(e) => {
            tracing::error!(error = %e, "device request was cancelled");
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "device request was cancelled".to_string(),
                kind: "internal".to_string(),
                causes: vec![e.to_string()],
            })
        }
    }
}

// ============================================================================
// Power
// ============================================================================

#[get("/{address}/power/on")]
pub async fn power_on(controller: Data<DeviceController>, path: Path<String>) -> impl Responder {
    let address = path.into_inner();
    tracing::info!(%address, "power on");
    let controller = controller.get_ref().clone();
    respond(web::block(move || controller.power_on(&address)).await)
}

#[get("/{address}/power/standby")]
pub async fn standby(controller: Data<DeviceController>, path: Path<String>) -> impl Responder {
    let address = path.into_inner();
    tracing::info!(%address, "standby");
    let controller = controller.get_ref().clone();
    respond(web::block(move || controller.standby(&address)).await)
}

#[get("/{address}/power/status")]
pub async fn get_power(controller: Data<DeviceController>, path: Path<String>) -> impl Responder {
    let address = path.into_inner();
    let controller = controller.get_ref().clone();
    respond(web::block(move || controller.get_power(&address)).await)
}

// ============================================================================
// Inputs
// ============================================================================

#[get("/{address}/input/current")]
pub async fn get_input(controller: Data<DeviceController>, path: Path<String>) -> impl Responder {
    let address = path.into_inner();
    let controller = controller.get_ref().clone();
    respond(web::block(move || controller.get_input(&address)).await)
}

#[get("/{address}/input/list")]
pub async fn get_input_list(
    controller: Data<DeviceController>,
    path: Path<String>,
) -> impl Responder {
    let address = path.into_inner();
    let controller = controller.get_ref().clone();
    respond(web::block(move || controller.get_input_list(&address)).await)
}

#[get("/{address}/input/{port}")]
pub async fn switch_input(
    controller: Data<DeviceController>,
    path: Path<(String, String)>,
) -> impl Responder {
    let (address, port) = path.into_inner();
    tracing::info!(%address, %port, "switch input");
    let controller = controller.get_ref().clone();
    respond(web::block(move || controller.switch_input(&address, &port)).await)
}

#[get("/{address}/active/{port}")]
pub async fn get_active_signal(
    controller: Data<DeviceController>,
    path: Path<(String, String)>,
) -> impl Responder {
    let (address, port) = path.into_inner();
    let controller = controller.get_ref().clone();
    respond(web::block(move || controller.get_active_signal(&address, &port)).await)
}

// ============================================================================
// Volume
// ============================================================================

#[get("/{address}/volume/up")]
pub async fn volume_up(controller: Data<DeviceController>, path: Path<String>) -> impl Responder {
    let address = path.into_inner();
    tracing::info!(%address, "volume up");
    let controller = controller.get_ref().clone();
    respond(web::block(move || controller.volume_up(&address)).await)
}

#[get("/{address}/volume/down")]
pub async fn volume_down(
    controller: Data<DeviceController>,
    path: Path<String>,
) -> impl Responder {
    let address = path.into_inner();
    tracing::info!(%address, "volume down");
    let controller = controller.get_ref().clone();
    respond(web::block(move || controller.volume_down(&address)).await)
}

#[get("/{address}/volume/mute")]
pub async fn mute(controller: Data<DeviceController>, path: Path<String>) -> impl Responder {
    let address = path.into_inner();
    tracing::info!(%address, "mute");
    let controller = controller.get_ref().clone();
    respond(web::block(move || controller.mute(&address)).await)
}

#[get("/{address}/volume/unmute")]
pub async fn unmute(controller: Data<DeviceController>, path: Path<String>) -> impl Responder {
    let address = path.into_inner();
    tracing::info!(%address, "unmute");
    let controller = controller.get_ref().clone();
    respond(web::block(move || controller.unmute(&address)).await)
}

#[get("/{address}/volume/level")]
pub async fn get_volume(controller: Data<DeviceController>) -> impl Responder {
    HttpResponse::Ok().json(controller.get_volume())
}

#[get("/{address}/volume/mute/status")]
pub async fn get_mute(controller: Data<DeviceController>) -> impl Responder {
    HttpResponse::Ok().json(controller.get_mute())
}

#[get("/{address}/volume/set/{value}")]
pub async fn set_volume(
    controller: Data<DeviceController>,
    path: Path<(String, String)>,
) -> impl Responder {
    let (_, value) = path.into_inner();
    HttpResponse::Ok().json(controller.set_volume(&value))
}

// ============================================================================
// Display
// ============================================================================

#[get("/{address}/display/blank")]
pub async fn blank_display(controller: Data<DeviceController>) -> impl Responder {
    HttpResponse::Ok().json(controller.blank_display())
}

#[get("/{address}/display/unblank")]
pub async fn unblank_display(controller: Data<DeviceController>) -> impl Responder {
    HttpResponse::Ok().json(controller.unblank_display())
}

#[get("/{address}/display/status")]
pub async fn get_blank(controller: Data<DeviceController>) -> impl Responder {
    HttpResponse::Ok().json(controller.get_blank())
}

// ============================================================================
// Hardware and raw keys
// ============================================================================

#[get("/{address}/hardware")]
pub async fn get_hardware_info(
    controller: Data<DeviceController>,
    path: Path<String>,
) -> impl Responder {
    let address = path.into_inner();
    let controller = controller.get_ref().clone();
    respond(web::block(move || controller.get_hardware_info(&address)).await)
}

#[get("/{address}/remote/{action}/{key}")]
pub async fn send_remote_key(
    controller: Data<DeviceController>,
    path: Path<(String, String, String)>,
) -> impl Responder {
    let (address, action, key) = path.into_inner();
    tracing::info!(%address, %action, %key, "remote key");
    let controller = controller.get_ref().clone();
    respond(web::block(move || controller.send_key(&address, &action, &key)).await)
}
