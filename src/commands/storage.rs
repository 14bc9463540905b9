//! Backup schedule, ISO and user-data handlers.

use std::io::Write;

use tracing::debug;

use crate::api::InstanceApi;
use crate::cli::{BackupCommand, IsoCommand, UserDataCommand};
use crate::printer::Printer;
use crate::request::{BackupScheduleRequest, InstanceUpdateRequest};
use crate::user_data;

use super::{Outcome, confirm, remote};

pub(super) async fn backup<A, W>(
    api: &A,
    command: BackupCommand,
    printer: &mut Printer<W>,
) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    match command {
        BackupCommand::Get(args) => {
            let schedule = api
                .get_backup_schedule(&args.instance_id)
                .await
                .map_err(remote("getting backup schedule"))?;
            printer.backup_schedule(&schedule)?;
            Ok(())
        }
        BackupCommand::Create(args) => {
            const ACTION: &str = "creating backup schedule";
            let request = BackupScheduleRequest::from(&args);
            api.set_backup_schedule(&args.instance.instance_id, &request)
                .await
                .map_err(remote(ACTION))?;
            confirm(printer, ACTION, "Created backup schedule")
        }
    }
}

pub(super) async fn iso<A, W>(api: &A, command: IsoCommand, printer: &mut Printer<W>) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    match command {
        IsoCommand::Status(args) => {
            let status = api
                .iso_status(&args.instance_id)
                .await
                .map_err(remote("getting iso state info"))?;
            printer.iso_status(&status)?;
            Ok(())
        }
        IsoCommand::Attach(args) => {
            const ACTION: &str = "attaching iso";
            api.attach_iso(&args.instance.instance_id, &args.iso_id)
                .await
                .map_err(remote(ACTION))?;
            confirm(printer, ACTION, "ISO has been attached")
        }
        IsoCommand::Detach(args) => {
            const ACTION: &str = "detaching iso";
            api.detach_iso(&args.instance_id)
                .await
                .map_err(remote(ACTION))?;
            confirm(printer, ACTION, "ISO has been detached")
        }
    }
}

pub(super) async fn user_data<A, W>(
    api: &A,
    command: UserDataCommand,
    printer: &mut Printer<W>,
) -> Outcome<A>
where
    A: InstanceApi + Sync,
    W: Write,
{
    match command {
        UserDataCommand::Set(args) => {
            const ACTION: &str = "setting user-data";
            let encoded = user_data::load_encoded(&args.userdata)?;
            debug!(path = %args.userdata, encoded_len = encoded.len(), "loaded user-data");
            let request = InstanceUpdateRequest::user_data(encoded);
            api.update(&args.instance.instance_id, &request)
                .await
                .map_err(remote(ACTION))?;
            confirm(printer, ACTION, "Set user-data for server")
        }
        UserDataCommand::Get(args) => {
            let data = api
                .get_user_data(&args.instance_id)
                .await
                .map_err(remote("getting user-data"))?;
            printer.user_data(&data)?;
            Ok(())
        }
    }
}
