//! Instance lifecycle, inventory and update handlers.

use std::io::Write;

use tracing::{debug, info};

use crate::api::InstanceApi;
use crate::cli::{
    AppCommand, CreateArgs, FirewallGroupArgs, InstanceArg, LabelArgs, OsCommand, PagingArgs,
    PlansCommand, RestoreArgs, TagArgs,
};
use crate::printer::Printer;
use crate::request::{InstanceCreateRequest, InstanceUpdateRequest, ListOptions, RestoreRequest};

use super::{CommandError, Outcome, confirm, remote};

pub(super) async fn start<A, W>(api: &A, args: &InstanceArg, printer: &mut Printer<W>) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    const ACTION: &str = "starting server";
    api.start(&args.instance_id).await.map_err(remote(ACTION))?;
    confirm(printer, ACTION, "Started up server")
}

pub(super) async fn stop<A, W>(api: &A, args: &InstanceArg, printer: &mut Printer<W>) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    const ACTION: &str = "stopping server";
    api.halt(&args.instance_id).await.map_err(remote(ACTION))?;
    confirm(printer, ACTION, "Stopped the server")
}

pub(super) async fn restart<A, W>(
    api: &A,
    args: &InstanceArg,
    printer: &mut Printer<W>,
) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    const ACTION: &str = "rebooting server";
    api.reboot(&args.instance_id).await.map_err(remote(ACTION))?;
    confirm(printer, ACTION, "Rebooted server")
}

pub(super) async fn reinstall<A, W>(
    api: &A,
    args: &InstanceArg,
    printer: &mut Printer<W>,
) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    const ACTION: &str = "reinstalling server";
    api.reinstall(&args.instance_id).await.map_err(remote(ACTION))?;
    confirm(printer, ACTION, "Reinstalled server")
}

pub(super) async fn delete<A, W>(
    api: &A,
    args: &InstanceArg,
    printer: &mut Printer<W>,
) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    const ACTION: &str = "deleting server";
    api.delete(&args.instance_id).await.map_err(remote(ACTION))?;
    confirm(printer, ACTION, "Deleted server")
}

pub(super) async fn tag<A, W>(api: &A, args: &TagArgs, printer: &mut Printer<W>) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    const ACTION: &str = "adding tag to server";
    let request = InstanceUpdateRequest::tag(&args.tag);
    api.update(&args.instance.instance_id, &request)
        .await
        .map_err(remote(ACTION))?;
    confirm(printer, ACTION, &format!("Tagged server with : {}", args.tag))
}

pub(super) async fn label<A, W>(api: &A, args: &LabelArgs, printer: &mut Printer<W>) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    const ACTION: &str = "labeling server";
    let request = InstanceUpdateRequest::label(&args.label);
    api.update(&args.instance.instance_id, &request)
        .await
        .map_err(remote(ACTION))?;
    confirm(printer, ACTION, &format!("Labeled server with : {}", args.label))
}

pub(super) async fn update_firewall_group<A, W>(
    api: &A,
    args: &FirewallGroupArgs,
    printer: &mut Printer<W>,
) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    const ACTION: &str = "setting firewall group";
    let request = InstanceUpdateRequest::firewall_group(&args.firewall_group_id);
    api.update(&args.instance_id, &request)
        .await
        .map_err(remote(ACTION))?;
    confirm(printer, ACTION, "Updated firewall-group")
}

pub(super) async fn os<A, W>(api: &A, command: OsCommand, printer: &mut Printer<W>) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    const ACTION: &str = "updating os";
    let OsCommand::Change(args) = command;
    let request = InstanceUpdateRequest::os(args.os);
    api.update(&args.instance.instance_id, &request)
        .await
        .map_err(remote(ACTION))?;
    confirm(printer, ACTION, "Updated OS")
}

pub(super) async fn app<A, W>(api: &A, command: AppCommand, printer: &mut Printer<W>) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    const ACTION: &str = "updating application";
    let AppCommand::Change(args) = command;
    let request = InstanceUpdateRequest::app(args.app);
    api.update(&args.instance.instance_id, &request)
        .await
        .map_err(remote(ACTION))?;
    confirm(printer, ACTION, "Updated Application")
}

pub(super) async fn plans<A, W>(
    api: &A,
    command: PlansCommand,
    printer: &mut Printer<W>,
) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    const ACTION: &str = "upgrading plans";
    let PlansCommand::Upgrade(args) = command;
    let request = InstanceUpdateRequest::plan(&args.plan);
    api.update(&args.instance.instance_id, &request)
        .await
        .map_err(remote(ACTION))?;
    confirm(printer, ACTION, "Upgraded plan")
}

pub(super) async fn restore<A, W>(
    api: &A,
    args: &RestoreArgs,
    printer: &mut Printer<W>,
) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    const ACTION: &str = "restoring instance";
    let request = RestoreRequest::from_args(args)?;
    api.restore(&args.instance.instance_id, &request)
        .await
        .map_err(remote(ACTION))?;
    confirm(printer, ACTION, "Instance has been restored")
}

pub(super) async fn create<A, W>(api: &A, args: &CreateArgs, printer: &mut Printer<W>) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    const ACTION: &str = "creating instance";
    let request = InstanceCreateRequest::from_args(args)
        .map_err(|source| CommandError::Invalid { action: ACTION, source })?;
    debug!(
        region = %request.region,
        plan = %request.plan,
        os_source = %request.os_source,
        os_id = request.os_id,
        "built instance create request"
    );

    let instance = api.create(&request).await.map_err(remote(ACTION))?;
    info!(instance_id = %instance.id, "instance created");
    printer.server(&instance)?;
    Ok(())
}

pub(super) async fn get<A, W>(api: &A, args: &InstanceArg, printer: &mut Printer<W>) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    let instance = api
        .get(&args.instance_id)
        .await
        .map_err(remote("getting server"))?;
    printer.server(&instance)?;
    Ok(())
}

pub(super) async fn list<A, W>(api: &A, args: &PagingArgs, printer: &mut Printer<W>) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    let options = ListOptions::from(args);
    let (instances, meta) = api
        .list(&options)
        .await
        .map_err(remote("getting list of servers"))?;
    debug!(count = instances.len(), total = meta.total, "listed servers");
    printer.server_list(&instances, &meta)?;
    Ok(())
}

pub(super) async fn bandwidth<A, W>(
    api: &A,
    args: &InstanceArg,
    printer: &mut Printer<W>,
) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    let bandwidth = api
        .get_bandwidth(&args.instance_id)
        .await
        .map_err(remote("getting bandwidth for server"))?;
    printer.bandwidth(&bandwidth)?;
    Ok(())
}
