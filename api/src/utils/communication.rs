use crate::config::{Config, Environment};
use crate::errors::*;
use crate::utils::resend;

pub enum CommunicationType {
    Email,
    Sms,
}

pub struct CommAddress {
    addresses: Vec<String>,
}

impl CommAddress {
    pub fn new() -> CommAddress {
        CommAddress { addresses: Vec::new() }
    }

    pub fn from(address: String) -> CommAddress {
        CommAddress {
            addresses: vec![address],
        }
    }

    pub fn from_vec(addresses: Vec<String>) -> CommAddress {
        CommAddress { addresses }
    }

    pub fn get(&self) -> Vec<String> {
        self.addresses.clone()
    }

    pub fn get_first(&self) -> Result<String, TicketGateError> {
        if !self.addresses.is_empty() {
            Ok(self.addresses[0].clone())
        } else {
            Err(ApplicationError::new("Minimum of one communication address required".to_string()).into())
        }
    }

    pub fn push(&mut self, address: String) {
        self.addresses.push(address);
    }
}

pub struct Communication {
    pub comm_type: CommunicationType,
    pub title: String,
    pub body: Option<String>,
    pub source: Option<CommAddress>,
    pub destinations: CommAddress,
}

impl Communication {
    pub fn new(
        comm_type: CommunicationType,
        title: String,
        body: Option<String>,
        source: Option<CommAddress>,
        destinations: CommAddress,
    ) -> Communication {
        Communication {
            comm_type,
            title,
            body,
            source,
            destinations,
        }
    }

    pub fn send(&self, config: &Config) -> Result<(), TicketGateError> {
        if config.environment == Environment::Test || config.block_external_comms {
            //Disable communication system when testing
            return Ok(());
        }

        let destination_addresses = self.destinations.get();
        match self.comm_type {
            CommunicationType::Email => match (&self.source, &self.body) {
                (Some(source), Some(body)) => {
                    let source_address = source.get_first()?;
                    resend::send_email(
                        &config.resend_api_key,
                        &source_address,
                        &destination_addresses,
                        &self.title,
                        body,
                    )
                }
                _ => Err(ApplicationError::new("Email source not specified".to_string()).into()),
            },
            CommunicationType::Sms => {
                Err(ApplicationError::new("SMS communication not implemented".to_string()).into())
            }
        }
    }
}
