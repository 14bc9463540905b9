//! Plain-text rendering of API results.
//!
//! Tables are built with `prettytable` in a borderless format so columns line
//! up without box drawing. Paged lists end with a `META` block carrying the
//! total and the cursors needed to fetch the neighbouring pages.

use std::io::{self, Write};

use prettytable::format::{FormatBuilder, TableFormat};
use prettytable::{Table, row};

use crate::api::{
    BackupSchedule, Bandwidth, Instance, Ipv4, Ipv6, IsoStatus, Meta, ReverseEntry, UserData,
};
use crate::user_data::decode_for_display;

const SEPARATOR: &str = "======================================";

/// Columns are separated by two spaces and carry no borders.
fn plain_format() -> TableFormat {
    FormatBuilder::new().padding(0, 2).build()
}

fn plain_table() -> Table {
    let mut table = Table::new();
    table.set_format(plain_format());
    table
}

/// Renders results to an injected writer.
pub struct Printer<W> {
    out: W,
}

impl<W: Write> Printer<W> {
    /// Wraps `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn table(&mut self, table: &Table) -> io::Result<()> {
        write!(self.out, "{table}")
    }

    /// Writes a single confirmation line.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when writing fails.
    pub fn message(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Writes the pagination block that closes every paged list.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when writing fails.
    pub fn meta(&mut self, meta: &Meta) -> io::Result<()> {
        self.message(SEPARATOR)?;
        self.message("META")?;
        let mut table = plain_table();
        table.set_titles(row!["TOTAL", "NEXT PAGE", "PREV PAGE"]);
        table.add_row(row![meta.total, meta.links.next, meta.links.prev]);
        self.table(&table)
    }

    /// Writes a table of instances followed by the pagination block.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when writing fails.
    pub fn server_list(&mut self, servers: &[Instance], meta: &Meta) -> io::Result<()> {
        let mut table = plain_table();
        table.set_titles(row![
            "ID", "IP", "LABEL", "OS", "STATUS", "REGION", "CPU", "RAM", "DISK", "BANDWIDTH"
        ]);
        for server in servers {
            table.add_row(row![
                server.id,
                server.main_ip,
                server.label,
                server.os,
                server.status,
                server.region,
                server.vcpu_count,
                server.ram,
                server.disk,
                server.allowed_bandwidth
            ]);
        }
        self.table(&table)?;
        self.meta(meta)
    }

    /// Writes the detail block of a single instance.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when writing fails.
    pub fn server(&mut self, server: &Instance) -> io::Result<()> {
        let fields = [
            ("ID", server.id.clone()),
            ("OS", server.os.clone()),
            ("RAM", server.ram.to_string()),
            ("DISK", server.disk.to_string()),
            ("MAIN IP", server.main_ip.clone()),
            ("VCPU COUNT", server.vcpu_count.to_string()),
            ("REGION", server.region.clone()),
            ("PLAN", server.plan.clone()),
            ("DATE CREATED", server.date_created.clone()),
            ("STATUS", server.status.clone()),
            ("ALLOWED BANDWIDTH", server.allowed_bandwidth.to_string()),
            ("NETMASK V4", server.netmask_v4.clone()),
            ("GATEWAY V4", server.gateway_v4.clone()),
            ("POWER STATUS", server.power_status.clone()),
            ("SERVER STATE", server.server_status.clone()),
            ("V6 NETWORK", server.v6_network.clone()),
            ("V6 MAIN IP", server.v6_main_ip.clone()),
            ("V6 NETWORK SIZE", server.v6_network_size.to_string()),
            ("LABEL", server.label.clone()),
            ("INTERNAL IP", server.internal_ip.clone()),
            ("KVM", server.kvm.clone()),
            ("TAG", server.tag.clone()),
            ("OS ID", server.os_id.to_string()),
            ("APP ID", server.app_id.to_string()),
            ("FIREWALL GROUP ID", server.firewall_group_id.clone()),
            ("FEATURES", server.features.join(",")),
            ("HOSTNAME", server.hostname.clone()),
        ];

        let mut table = plain_table();
        for (key, value) in fields {
            table.add_row(row![key, value]);
        }
        if !server.default_password.is_empty() {
            table.add_row(row!["DEFAULT PASSWORD", server.default_password]);
        }

        self.message("SERVER INFO")?;
        self.table(&table)
    }

    /// Writes daily bandwidth usage, oldest day first.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when writing fails.
    pub fn bandwidth(&mut self, bandwidth: &Bandwidth) -> io::Result<()> {
        let mut table = plain_table();
        table.set_titles(row!["DATE", "INCOMING BYTES", "OUTGOING BYTES"]);
        for (date, usage) in &bandwidth.days {
            table.add_row(row![date, usage.incoming_bytes, usage.outgoing_bytes]);
        }
        self.table(&table)
    }

    /// Writes a table of IPv4 addresses followed by the pagination block.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when writing fails.
    pub fn ipv4_list(&mut self, addresses: &[Ipv4], meta: &Meta) -> io::Result<()> {
        let mut table = plain_table();
        table.set_titles(row!["IP", "NETMASK", "GATEWAY", "TYPE", "REVERSE"]);
        for address in addresses {
            table.add_row(row![
                address.ip,
                address.netmask,
                address.gateway,
                address.ip_type,
                address.reverse
            ]);
        }
        self.table(&table)?;
        self.meta(meta)
    }

    /// Writes a table of IPv6 networks followed by the pagination block.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when writing fails.
    pub fn ipv6_list(&mut self, networks: &[Ipv6], meta: &Meta) -> io::Result<()> {
        let mut table = plain_table();
        table.set_titles(row!["IP", "NETWORK", "NETWORK SIZE", "TYPE"]);
        for network in networks {
            table.add_row(row![
                network.ip,
                network.network,
                network.network_size,
                network.ip_type
            ]);
        }
        self.table(&table)?;
        self.meta(meta)
    }

    /// Writes the backup schedule detail block.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when writing fails.
    pub fn backup_schedule(&mut self, schedule: &BackupSchedule) -> io::Result<()> {
        let mut table = plain_table();
        table.set_titles(row![
            "ENABLED",
            "CRON TYPE",
            "NEXT SCHEDULE TIME UTC",
            "HOUR",
            "DOW",
            "DOM"
        ]);
        table.add_row(row![
            schedule.enabled,
            schedule.cron_type,
            schedule.next_scheduled_time_utc,
            schedule.hour,
            schedule.dow,
            schedule.dom
        ]);
        self.table(&table)
    }

    /// Writes the ISO attachment state.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when writing fails.
    pub fn iso_status(&mut self, status: &IsoStatus) -> io::Result<()> {
        let mut table = plain_table();
        table.set_titles(row!["ISO ID", "STATE"]);
        table.add_row(row![status.iso_id, status.state]);
        self.table(&table)
    }

    /// Writes IPv6 reverse DNS entries.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when writing fails.
    pub fn reverse_ipv6(&mut self, entries: &[ReverseEntry]) -> io::Result<()> {
        let mut table = plain_table();
        table.set_titles(row!["IP", "REVERSE"]);
        for entry in entries {
            table.add_row(row![entry.ip, entry.reverse]);
        }
        self.table(&table)
    }

    /// Writes the decoded user-data.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when writing fails.
    pub fn user_data(&mut self, user_data: &UserData) -> io::Result<()> {
        self.message("USERDATA")?;
        self.message(&decode_for_display(&user_data.data))
    }
}
