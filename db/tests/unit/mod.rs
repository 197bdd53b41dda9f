mod ticket_requests;
