use super::dto::{EmailRecipient, SendEmailIn};
use crate::rabbitmq::DEFAULT_EXCHANGE;
use anyhow::Result;
use deadpool_lapin::Pool;
use entity::bill;
use lapin::{
    options::BasicPublishOptions, publisher_confirm::PublisherConfirm, BasicProperties, Channel,
};

/// rabbitmq queue to publish RPC requests to the mailer service
static MAILER_QUEUE: &str = "mailer";

/// RPC operation to send a email
static OP_SEND_EMAIL: &str = "sendEmail";

/// A abstraction to make RPC calls to the mailer microservice
#[derive(Clone)]
pub struct MailerService {
    rmq_conn_pool: Pool,
}

impl MailerService {
    pub fn new(rmq_conn_pool: Pool) -> MailerService {
        MailerService { rmq_conn_pool }
    }

    async fn get_channel(&self) -> Result<Channel> {
        Ok(self.rmq_conn_pool.get().await?.create_channel().await?)
    }

    async fn publish_to_mailer_service(
        &self,
        payload: &[u8],
        rpc_name: &str,
    ) -> Result<PublisherConfirm> {
        Ok(self
            .get_channel()
            .await?
            .basic_publish(
                DEFAULT_EXCHANGE,
                MAILER_QUEUE,
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default()
                    .with_content_type("application/json".into())
                    .with_kind(rpc_name.into()),
            )
            .await?)
    }

    pub async fn send_email(&self, input: SendEmailIn) -> Result<PublisherConfirm> {
        self.publish_to_mailer_service(serde_json::to_string(&input)?.as_bytes(), OP_SEND_EMAIL)
            .await
    }

    /// Sends the charge receipt of a bill to the client email address
    pub async fn send_bill_email(
        &self,
        bill: &bill::Model,
        client_email: String,
    ) -> Result<PublisherConfirm> {
        let body = format!(
            "<p>Se ha registrado un nuevo cargue en {}.</p>\
             <ul>\
             <li>Fecha: {} {}</li>\
             <li>Masa total: {:.2} kg</li>\
             <li>Total: $ {:.2}</li>\
             </ul>",
            bill.branch_office_name, bill.fecha_inicial, bill.hora_inicial, bill.masa_total,
            bill.total
        );

        let email = SendEmailIn::default()
            .with_subject(&format!("Remisión {}", bill.id))
            .with_body_html(&body)
            .with_to(vec![EmailRecipient {
                email: client_email,
                replacements: None,
            }]);

        self.send_email(email).await
    }
}
