use diesel::pg::PgConnection;
use log::Level::Error;
use ticketgate_db::models::{ScanStatus, Ticket, TicketValidationInfo, TokenIssuer, User};
use ticketgate_db::utils::errors::ErrorCode;

/// Scan-and-validate response assembly for the scanner client. The status
/// vocabulary (VALID, USED, CANCELLED, EXPIRED, NOT_FOUND, ERROR) is a wire
/// contract; anything unexpected maps to ERROR rather than escaping.
pub fn scan_and_validate(
    qr_token: &str,
    validator: &User,
    issuer: &dyn TokenIssuer,
    conn: &PgConnection,
) -> TicketValidationInfo {
    match Ticket::validate(qr_token, validator, issuer, conn) {
        Ok(_ticket) => match Ticket::validation_info(qr_token, conn) {
            Ok(mut info) => {
                // The scan itself succeeded; the projection now reads Used,
                // but the scanner is told the presented ticket was valid.
                info.status = ScanStatus::Valid;
                info.message = "Ticket validated - entry granted".to_string();
                info
            }
            Err(err) => report_error(&err.to_string()),
        },
        Err(err) => match err.error_code {
            ErrorCode::NoResults => TicketValidationInfo::not_found(),
            ErrorCode::AccessError => {
                TicketValidationInfo::error("You do not have permission to validate this ticket")
            }
            ErrorCode::AlreadyUsedError | ErrorCode::TicketCancelledError | ErrorCode::TicketExpiredError => {
                // Project the terminal state the ticket is actually in
                ticket_info(qr_token, conn)
            }
            _ => report_error(&err.to_string()),
        },
    }
}

/// Read-only preview used by both the holder view and the scanner before
/// committing to a scan. Never mutates anything.
pub fn ticket_info(qr_token: &str, conn: &PgConnection) -> TicketValidationInfo {
    match Ticket::validation_info(qr_token, conn) {
        Ok(info) => info,
        Err(err) => report_error(&err.to_string()),
    }
}

fn report_error(message: &str) -> TicketValidationInfo {
    jlog!(Error, "ticketgate_api::services::scan", "Scan failed", { "error": message });
    TicketValidationInfo::error(message)
}
