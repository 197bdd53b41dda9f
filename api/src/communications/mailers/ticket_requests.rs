use crate::communications::mailers::event_summary_html;
use crate::config::Config;
use crate::errors::*;
use crate::utils::communication::{CommAddress, Communication, CommunicationType};
use ticketgate_db::models::{Event, TicketRequest, User};

pub fn new_request_notification(
    config: &Config,
    request: &TicketRequest,
    event: &Event,
    organizer: &User,
) -> Result<(), TicketGateError> {
    let source = CommAddress::from(config.communication_default_source_email.clone());
    let destinations = CommAddress::from(organizer.email.clone());
    let title = format!("{}: New ticket request for {}", config.app_name, event.name);
    let body = format!(
        "{}<p>{} ({}, {}) requested {} ticket(s).</p><p>Review it at {}/requests/{}</p>",
        event_summary_html(event),
        request.full_name,
        request.email,
        request.phone,
        request.quantity,
        config.front_end_url,
        request.id
    );

    Communication::new(CommunicationType::Email, title, Some(body), Some(source), destinations).send(config)
}

pub fn request_confirmation(
    config: &Config,
    request: &TicketRequest,
    event: &Event,
) -> Result<(), TicketGateError> {
    let source = CommAddress::from(config.communication_default_source_email.clone());
    let destinations = CommAddress::from(request.email.clone());
    let title = format!("{}: We received your ticket request", config.app_name);
    let body = format!(
        "{}<p>Hi {}, we received your request for {} ticket(s). \
         The organizer will review it and you will hear from us either way.</p>",
        event_summary_html(event),
        request.full_name,
        request.quantity
    );

    Communication::new(CommunicationType::Email, title, Some(body), Some(source), destinations).send(config)
}

pub fn request_approved(config: &Config, request: &TicketRequest, event: &Event) -> Result<(), TicketGateError> {
    let source = CommAddress::from(config.communication_default_source_email.clone());
    let destinations = CommAddress::from(request.email.clone());
    let title = format!("{}: Your ticket request was approved", config.app_name);
    let notes = request
        .organizer_notes
        .as_ref()
        .map(|notes| format!("<p>Note from the organizer: {}</p>", notes))
        .unwrap_or_default();
    let body = format!(
        "{}<p>Hi {}, your request for {} ticket(s) was approved. Your tickets will follow shortly.</p>{}",
        event_summary_html(event),
        request.full_name,
        request.quantity,
        notes
    );

    Communication::new(CommunicationType::Email, title, Some(body), Some(source), destinations).send(config)
}

pub fn request_rejected(config: &Config, request: &TicketRequest, event: &Event) -> Result<(), TicketGateError> {
    let source = CommAddress::from(config.communication_default_source_email.clone());
    let destinations = CommAddress::from(request.email.clone());
    let title = format!("{}: Your ticket request was declined", config.app_name);
    let notes = request
        .organizer_notes
        .as_ref()
        .map(|notes| format!("<p>Note from the organizer: {}</p>", notes))
        .unwrap_or_default();
    let body = format!(
        "{}<p>Hi {}, unfortunately your request for {} ticket(s) could not be accommodated.</p>{}",
        event_summary_html(event),
        request.full_name,
        request.quantity,
        notes
    );

    Communication::new(CommunicationType::Email, title, Some(body), Some(source), destinations).send(config)
}

pub fn request_cancelled(
    config: &Config,
    request: &TicketRequest,
    event: &Event,
    organizer: &User,
) -> Result<(), TicketGateError> {
    let source = CommAddress::from(config.communication_default_source_email.clone());
    let destinations = CommAddress::from(organizer.email.clone());
    let title = format!("{}: A ticket request was cancelled", config.app_name);
    let body = format!(
        "{}<p>{} cancelled their request for {} ticket(s). The quantity no longer counts against capacity.</p>",
        event_summary_html(event),
        request.full_name,
        request.quantity
    );

    Communication::new(CommunicationType::Email, title, Some(body), Some(source), destinations).send(config)
}
