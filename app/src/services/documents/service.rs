use crate::rabbitmq::DEFAULT_EXCHANGE;
use anyhow::Result;
use deadpool_lapin::Pool;
use entity::bill;
use lapin::{
    options::BasicPublishOptions, publisher_confirm::PublisherConfirm, BasicProperties, Channel,
};

/// rabbitmq queue to publish RPC requests to the document renderer service
static DOCUMENTS_QUEUE: &str = "documents";

/// RPC operation to render the PDF receipt of a bill
static OP_RENDER_BILL: &str = "renderBill";

/// A abstraction to make RPC calls to the document renderer microservice,
/// which turns bills into their printable PDF receipts
#[derive(Clone)]
pub struct DocumentsService {
    rmq_conn_pool: Pool,
}

impl DocumentsService {
    pub fn new(rmq_conn_pool: Pool) -> DocumentsService {
        DocumentsService { rmq_conn_pool }
    }

    async fn get_channel(&self) -> Result<Channel> {
        Ok(self.rmq_conn_pool.get().await?.create_channel().await?)
    }

    pub async fn render_bill_pdf(&self, bill: &bill::Model) -> Result<PublisherConfirm> {
        Ok(self
            .get_channel()
            .await?
            .basic_publish(
                DEFAULT_EXCHANGE,
                DOCUMENTS_QUEUE,
                BasicPublishOptions::default(),
                serde_json::to_string(bill)?.as_bytes(),
                BasicProperties::default()
                    .with_content_type("application/json".into())
                    .with_kind(OP_RENDER_BILL.into()),
            )
            .await?)
    }
}
