//! [`InstanceApi`] implementation over the `/instances` endpoints.

use reqwest::{Method, RequestBuilder};

use crate::api::{
    ApiFuture, BackupSchedule, Bandwidth, Instance, InstanceApi, Ipv4, Ipv6, IsoStatus, Meta,
    ReverseEntry, UserData,
};
use crate::request::{
    BackupScheduleRequest, InstanceCreateRequest, InstanceUpdateRequest, ListOptions,
    RestoreRequest, ReverseIpRequest,
};

use super::envelopes::{
    AttachIsoBody, BackupScheduleEnvelope, BandwidthEnvelope, CreateIpv4Body, InstanceEnvelope,
    InstanceListEnvelope, IpBody, Ipv4Envelope, Ipv4ListEnvelope, Ipv6ListEnvelope,
    IsoStatusEnvelope, ReverseIpv6Envelope, UserDataEnvelope,
};
use super::{VultrClient, VultrError};

impl VultrClient {
    fn instance_request(
        &self,
        method: Method,
        id: &str,
        suffix: &[&str],
    ) -> Result<RequestBuilder, VultrError> {
        let mut segments = vec!["instances", id];
        segments.extend_from_slice(suffix);
        self.request(method, &segments)
    }

    fn instance_action<'a>(
        &'a self,
        id: &'a str,
        action: &'static [&'static str],
    ) -> ApiFuture<'a, (), VultrError> {
        Box::pin(async move {
            let builder = self.instance_request(Method::POST, id, action)?;
            Self::execute_empty(builder).await
        })
    }
}

impl InstanceApi for VultrClient {
    type Error = VultrError;

    fn start<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error> {
        self.instance_action(id, &["start"])
    }

    fn halt<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error> {
        self.instance_action(id, &["halt"])
    }

    fn reboot<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error> {
        self.instance_action(id, &["reboot"])
    }

    fn reinstall<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error> {
        self.instance_action(id, &["reinstall"])
    }

    fn delete<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let builder = self.instance_request(Method::DELETE, id, &[])?;
            Self::execute_empty(builder).await
        })
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        request: &'a InstanceUpdateRequest,
    ) -> ApiFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let builder = self
                .instance_request(Method::PATCH, id, &[])?
                .json(request);
            Self::execute_empty(builder).await
        })
    }

    fn get<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Instance, Self::Error> {
        Box::pin(async move {
            let builder = self.instance_request(Method::GET, id, &[])?;
            let envelope: InstanceEnvelope = Self::execute_json(builder).await?;
            Ok(envelope.instance)
        })
    }

    fn list<'a>(
        &'a self,
        options: &'a ListOptions,
    ) -> ApiFuture<'a, (Vec<Instance>, Meta), Self::Error> {
        Box::pin(async move {
            let builder = self
                .request(Method::GET, &["instances"])?
                .query(&options.query_pairs());
            let envelope: InstanceListEnvelope = Self::execute_json(builder).await?;
            Ok((envelope.instances, envelope.meta))
        })
    }

    fn get_bandwidth<'a>(&'a self, id: &'a str) -> ApiFuture<'a, Bandwidth, Self::Error> {
        Box::pin(async move {
            let builder = self.instance_request(Method::GET, id, &["bandwidth"])?;
            let envelope: BandwidthEnvelope = Self::execute_json(builder).await?;
            Ok(envelope.bandwidth)
        })
    }

    fn list_ipv4<'a>(
        &'a self,
        id: &'a str,
        options: &'a ListOptions,
    ) -> ApiFuture<'a, (Vec<Ipv4>, Meta), Self::Error> {
        Box::pin(async move {
            let builder = self
                .instance_request(Method::GET, id, &["ipv4"])?
                .query(&options.query_pairs());
            let envelope: Ipv4ListEnvelope = Self::execute_json(builder).await?;
            Ok((envelope.ipv4s, envelope.meta))
        })
    }

    fn list_ipv6<'a>(
        &'a self,
        id: &'a str,
        options: &'a ListOptions,
    ) -> ApiFuture<'a, (Vec<Ipv6>, Meta), Self::Error> {
        Box::pin(async move {
            let builder = self
                .instance_request(Method::GET, id, &["ipv6"])?
                .query(&options.query_pairs());
            let envelope: Ipv6ListEnvelope = Self::execute_json(builder).await?;
            Ok((envelope.ipv6s, envelope.meta))
        })
    }

    fn create_ipv4<'a>(&'a self, id: &'a str, reboot: bool) -> ApiFuture<'a, Ipv4, Self::Error> {
        Box::pin(async move {
            let builder = self
                .instance_request(Method::POST, id, &["ipv4"])?
                .json(&CreateIpv4Body { reboot });
            let envelope: Ipv4Envelope = Self::execute_json(builder).await?;
            Ok(envelope.ipv4)
        })
    }

    fn delete_ipv4<'a>(&'a self, id: &'a str, ip: &'a str) -> ApiFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let builder = self.instance_request(Method::DELETE, id, &["ipv4", ip])?;
            Self::execute_empty(builder).await
        })
    }

    fn get_backup_schedule<'a>(
        &'a self,
        id: &'a str,
    ) -> ApiFuture<'a, BackupSchedule, Self::Error> {
        Box::pin(async move {
            let builder = self.instance_request(Method::GET, id, &["backup-schedule"])?;
            let envelope: BackupScheduleEnvelope = Self::execute_json(builder).await?;
            Ok(envelope.backup_schedule)
        })
    }

    fn set_backup_schedule<'a>(
        &'a self,
        id: &'a str,
        request: &'a BackupScheduleRequest,
    ) -> ApiFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let builder = self
                .instance_request(Method::POST, id, &["backup-schedule"])?
                .json(request);
            Self::execute_empty(builder).await
        })
    }

    fn iso_status<'a>(&'a self, id: &'a str) -> ApiFuture<'a, IsoStatus, Self::Error> {
        Box::pin(async move {
            let builder = self.instance_request(Method::GET, id, &["iso"])?;
            let envelope: IsoStatusEnvelope = Self::execute_json(builder).await?;
            Ok(envelope.iso_status)
        })
    }

    fn attach_iso<'a>(&'a self, id: &'a str, iso_id: &'a str) -> ApiFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let builder = self
                .instance_request(Method::POST, id, &["iso", "attach"])?
                .json(&AttachIsoBody { iso_id });
            Self::execute_empty(builder).await
        })
    }

    fn detach_iso<'a>(&'a self, id: &'a str) -> ApiFuture<'a, (), Self::Error> {
        self.instance_action(id, &["iso", "detach"])
    }

    fn restore<'a>(
        &'a self,
        id: &'a str,
        request: &'a RestoreRequest,
    ) -> ApiFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let builder = self
                .instance_request(Method::POST, id, &["restore"])?
                .json(request);
            Self::execute_empty(builder).await
        })
    }

    fn default_reverse_ipv4<'a>(
        &'a self,
        id: &'a str,
        ip: &'a str,
    ) -> ApiFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let builder = self
                .instance_request(Method::POST, id, &["ipv4", "reverse", "default"])?
                .json(&IpBody { ip });
            Self::execute_empty(builder).await
        })
    }

    fn list_reverse_ipv6<'a>(
        &'a self,
        id: &'a str,
    ) -> ApiFuture<'a, Vec<ReverseEntry>, Self::Error> {
        Box::pin(async move {
            let builder = self.instance_request(Method::GET, id, &["ipv6", "reverse"])?;
            let envelope: ReverseIpv6Envelope = Self::execute_json(builder).await?;
            Ok(envelope.reverse_ipv6s)
        })
    }

    fn delete_reverse_ipv6<'a>(
        &'a self,
        id: &'a str,
        ip: &'a str,
    ) -> ApiFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let builder = self.instance_request(Method::DELETE, id, &["ipv6", "reverse", ip])?;
            Self::execute_empty(builder).await
        })
    }

    fn create_reverse_ipv4<'a>(
        &'a self,
        id: &'a str,
        request: &'a ReverseIpRequest,
    ) -> ApiFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let builder = self
                .instance_request(Method::POST, id, &["ipv4", "reverse"])?
                .json(request);
            Self::execute_empty(builder).await
        })
    }

    fn create_reverse_ipv6<'a>(
        &'a self,
        id: &'a str,
        request: &'a ReverseIpRequest,
    ) -> ApiFuture<'a, (), Self::Error> {
        Box::pin(async move {
            let builder = self
                .instance_request(Method::POST, id, &["ipv6", "reverse"])?
                .json(request);
            Self::execute_empty(builder).await
        })
    }

    fn get_user_data<'a>(&'a self, id: &'a str) -> ApiFuture<'a, UserData, Self::Error> {
        Box::pin(async move {
            let builder = self.instance_request(Method::GET, id, &["user-data"])?;
            let envelope: UserDataEnvelope = Self::execute_json(builder).await?;
            Ok(envelope.user_data)
        })
    }

    fn create<'a>(
        &'a self,
        request: &'a InstanceCreateRequest,
    ) -> ApiFuture<'a, Instance, Self::Error> {
        Box::pin(async move {
            let builder = self.request(Method::POST, &["instances"])?.json(request);
            let envelope: InstanceEnvelope = Self::execute_json(builder).await?;
            Ok(envelope.instance)
        })
    }
}
