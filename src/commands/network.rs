//! IPv4, IPv6 and reverse DNS handlers.

use std::io::Write;

use tracing::info;

use crate::api::InstanceApi;
use crate::cli::{Ipv4Command, Ipv6Command, ReverseDnsCommand};
use crate::printer::Printer;
use crate::request::{ListOptions, ReverseIpRequest};

use super::{Outcome, confirm, remote};

pub(super) async fn ipv4<A, W>(api: &A, command: Ipv4Command, printer: &mut Printer<W>) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    match command {
        Ipv4Command::List(args) => {
            let options = ListOptions::from(&args.paging);
            let (addresses, meta) = api
                .list_ipv4(&args.instance.instance_id, &options)
                .await
                .map_err(remote("getting ipv4 info"))?;
            printer.ipv4_list(&addresses, &meta)?;
            Ok(())
        }
        Ipv4Command::Create(args) => {
            const ACTION: &str = "creating ipv4";
            let address = api
                .create_ipv4(&args.instance.instance_id, args.reboot)
                .await
                .map_err(remote(ACTION))?;
            info!(ip = %address.ip, "ipv4 address added");
            confirm(printer, ACTION, "IPV4 has been created")
        }
        Ipv4Command::Delete(args) => {
            const ACTION: &str = "deleting ipv4";
            api.delete_ipv4(&args.instance.instance_id, &args.ipv4)
                .await
                .map_err(remote(ACTION))?;
            confirm(printer, ACTION, "IPV4 has been deleted")
        }
    }
}

pub(super) async fn ipv6<A, W>(api: &A, command: Ipv6Command, printer: &mut Printer<W>) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    let Ipv6Command::List(args) = command;
    let options = ListOptions::from(&args.paging);
    let (networks, meta) = api
        .list_ipv6(&args.instance.instance_id, &options)
        .await
        .map_err(remote("getting ipv6 info"))?;
    printer.ipv6_list(&networks, &meta)?;
    Ok(())
}

pub(super) async fn reverse_dns<A, W>(
    api: &A,
    command: ReverseDnsCommand,
    printer: &mut Printer<W>,
) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    match command {
        ReverseDnsCommand::DefaultIpv4(args) => {
            const ACTION: &str = "setting default reverse dns";
            api.default_reverse_ipv4(&args.instance.instance_id, &args.ip)
                .await
                .map_err(remote(ACTION))?;
            confirm(printer, ACTION, "Set default reverse dns")
        }
        ReverseDnsCommand::ListIpv6(args) => {
            let entries = api
                .list_reverse_ipv6(&args.instance_id)
                .await
                .map_err(remote("getting the reverse ipv6 list"))?;
            printer.reverse_ipv6(&entries)?;
            Ok(())
        }
        ReverseDnsCommand::DeleteIpv6(args) => {
            const ACTION: &str = "deleting reverse ipv6 entry";
            api.delete_reverse_ipv6(&args.instance.instance_id, &args.ip)
                .await
                .map_err(remote(ACTION))?;
            confirm(printer, ACTION, "Deleted reverse DNS IPV6 entry")
        }
        ReverseDnsCommand::SetIpv4(args) => {
            const ACTION: &str = "setting reverse dns ipv4 entry";
            let request = ReverseIpRequest::from(&args);
            api.create_reverse_ipv4(&args.instance.instance_id, &request)
                .await
                .map_err(remote(ACTION))?;
            confirm(printer, ACTION, "Set reverse DNS entry for ipv4 address")
        }
        ReverseDnsCommand::SetIpv6(args) => {
            const ACTION: &str = "setting reverse dns ipv6 entry";
            let request = ReverseIpRequest::from(&args);
            api.create_reverse_ipv6(&args.instance.instance_id, &request)
                .await
                .map_err(remote(ACTION))?;
            confirm(printer, ACTION, "Set reverse DNS entry for ipv6 address")
        }
    }
}
