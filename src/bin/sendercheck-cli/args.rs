use std::net::IpAddr;
use std::time::Duration;

use clap::Parser;
use sendercheck_lib::{CheckKind, CheckOptions, FailAction, ResolverOptions};

#[derive(Parser)]
#[command(name = "sendercheck-cli")]
pub struct Cli {
    /// adresse IP du client SMTP
    #[arg(long)]
    pub ip: IpAddr,

    /// nom annoncé en EHLO/HELO (domaine ou littéral, ex. [1.2.3.4])
    #[arg(long)]
    pub helo: String,

    /// enveloppe MAIL FROM (vide = expéditeur nul, toujours accepté)
    #[arg(long = "mail-from", default_value = "")]
    pub mail_from: String,

    /// timeout par requête DNS (ms)
    #[arg(long = "timeout", default_value_t = 5_000)]
    pub timeout_ms: u64,

    /// nombre de tentatives par requête DNS
    #[arg(long, default_value_t = 2)]
    pub attempts: usize,

    /// action si le rDNS ne correspond pas: ignore|quarantine|reject
    #[arg(long = "rdns", default_value = "reject")]
    pub rdns_action: FailAction,

    /// action si le domaine expéditeur n'a pas de MX: ignore|quarantine|reject
    #[arg(long = "mx", default_value = "reject")]
    pub mx_action: FailAction,

    /// action si le nom EHLO ne résout pas vers l'IP: ignore|quarantine|reject
    #[arg(long = "ehlo", default_value = "reject")]
    pub ehlo_action: FailAction,

    /// format: human|json
    #[arg(long, default_value = "human")]
    pub format: String,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions::new()
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_attempts(self.attempts)
    }

    pub fn check_options(&self) -> CheckOptions {
        CheckOptions::new()
            .with_action(CheckKind::MatchingRdns, self.rdns_action)
            .with_action(CheckKind::MxRecord, self.mx_action)
            .with_action(CheckKind::MatchingEhlo, self.ehlo_action)
    }
}
