use toll_app::{AppError, ReportScope, Result, resolve_report_scope};
use toll_core::{TripWithTolls, VehicleTollCost};

use crate::{AppContext, DataResponse, OkResponse, ReportRequest};

fn resolve_scope(req: &ReportRequest) -> Result<ReportScope> {
    resolve_report_scope(&req.window_params())
}

fn parse_flag(name: &str, value: Option<&str>) -> Result<bool> {
    match value.map(str::trim) {
        None | Some("") => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(AppError::InvalidParameter(format!(
            "Invalid {name} value {other:?}. Use true or false"
        ))),
    }
}

pub fn toll_costs(
    ctx: &AppContext,
    req: ReportRequest,
) -> Result<DataResponse<Vec<VehicleTollCost>>> {
    let scope = resolve_scope(&req)?;
    let include_vehicle = parse_flag("include_vehicle", req.include_vehicle.as_deref())?;
    let totals = ctx
        .app_state
        .services
        .toll_costs
        .vehicle_totals(&scope, include_vehicle)?;
    Ok(DataResponse::new(totals))
}

pub fn trips_with_tolls(
    ctx: &AppContext,
    req: ReportRequest,
) -> Result<DataResponse<Vec<TripWithTolls>>> {
    let scope = resolve_scope(&req)?;
    let trips = ctx.app_state.services.trip_tolls.trips_with_tolls(&scope)?;
    tracing::debug!(
        user_id = %scope.user_id,
        trips = trips.len(),
        "built trips with tolls"
    );
    Ok(DataResponse::new(trips))
}

pub fn ok() -> OkResponse {
    OkResponse { ok: true }
}
