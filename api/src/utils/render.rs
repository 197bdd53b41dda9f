use crate::errors::*;
use image::{DynamicImage, ImageOutputFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;
use ticketgate_db::models::DisplayTicket;

/// Encodes arbitrary content as a QR code and returns PNG bytes. Pure
/// function of its input.
pub fn render_qr(content: &str, width: u32, height: u32) -> Result<Vec<u8>, TicketGateError> {
    let code = QrCode::new(content.as_bytes())?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(width, height)
        .build();

    let mut bytes: Vec<u8> = Vec::new();
    DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
    Ok(bytes)
}

/// The content scanners see is a validate link, so any QR reader lands on
/// the scan endpoint for this token.
pub fn validate_url(front_end_url: &str, qr_token: &str) -> String {
    format!("{}/validate/{}", front_end_url, qr_token)
}

/// Produces the scannable artifact for one ticket. Page layout around the
/// code is the presentation layer's concern; the artifact is the QR image
/// for the ticket's validate link, sized for print.
pub fn render_ticket_document(
    ticket: &DisplayTicket,
    qr_token: &str,
    front_end_url: &str,
    size: u32,
) -> Result<Vec<u8>, TicketGateError> {
    if ticket.ticket_code.is_empty() {
        return Err(ApplicationError::new("Ticket has no code to render".to_string()).into());
    }
    render_qr(&validate_url(front_end_url, qr_token), size, size)
}
