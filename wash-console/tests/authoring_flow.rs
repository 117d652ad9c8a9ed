//! End-to-end authoring flow against an in-memory backend:
//! edit a batch of drafts, submit, and page through the receipt set.

use async_trait::async_trait;
use shared::order::{
    CreateOrderRequest, CreateOrderResponse, EmployeeSummary, MaterialDetail, ServiceDetail,
};
use shared::{ConsoleError, ConsoleResult};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use wash_console::client::ConsoleApi;
use wash_console::orders::{AuthoringSession, SessionState};

/// In-memory backend: fixed catalog, employee directory, order counter
struct TestBackend {
    services: HashMap<i64, (&'static str, &'static str)>,
    materials: HashMap<i64, (&'static str, &'static str)>,
    next_order_id: AtomicI64,
    created: Mutex<Vec<CreateOrderRequest>>,
}

impl TestBackend {
    fn new() -> Self {
        let services = HashMap::from([
            (1, ("Exterior wash", "100")),
            (2, ("Polishing", "200")),
            (3, ("Interior detail", "350.50")),
        ]);
        let materials = HashMap::from([(7, ("Wax", "50")), (8, ("Microfiber", "12.25"))]);
        Self {
            services,
            materials,
            next_order_id: AtomicI64::new(101),
            created: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ConsoleApi for TestBackend {
    async fn fetch_service(&self, id: i64) -> ConsoleResult<ServiceDetail> {
        match self.services.get(&id) {
            Some((name, price)) => Ok(ServiceDetail {
                name: name.to_string(),
                price: price.to_string(),
            }),
            None => Err(ConsoleError::Api {
                status: 404,
                message: format!("service {} not found", id),
            }),
        }
    }

    async fn fetch_material(&self, id: i64) -> ConsoleResult<MaterialDetail> {
        match self.materials.get(&id) {
            Some((name, price)) => Ok(MaterialDetail {
                name: name.to_string(),
                sell_price: price.to_string(),
            }),
            None => Err(ConsoleError::Api {
                status: 404,
                message: format!("material {} not found", id),
            }),
        }
    }

    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> ConsoleResult<CreateOrderResponse> {
        self.created.lock().unwrap().push(request.clone());
        Ok(CreateOrderResponse {
            id: self.next_order_id.fetch_add(1, Ordering::SeqCst),
        })
    }

    async fn list_employees(&self) -> ConsoleResult<Vec<EmployeeSummary>> {
        Ok(vec![
            EmployeeSummary {
                id: 5,
                first_name: "Aibek".to_string(),
            },
            EmployeeSummary {
                id: 6,
                first_name: "Nurlan".to_string(),
            },
        ])
    }
}

async fn start_session() -> (AuthoringSession, std::sync::Arc<TestBackend>) {
    let backend = std::sync::Arc::new(TestBackend::new());
    let mut session = AuthoringSession::new(backend.clone());
    session.load_employees().await.unwrap();
    session.batch_mut().client_name = "Askar Mamytov".to_string();
    session.batch_mut().client_phone = "+996700123456".to_string();
    (session, backend)
}

#[tokio::test]
async fn full_batch_flow_from_editing_to_review() {
    let (mut session, backend) = start_session().await;

    // First vehicle: wash + polish by Aibek, 2x wax, 500 prepaid
    {
        let draft = session.batch_mut().current_mut();
        draft.set_car(3);
        draft.set_model(14);
        draft.set_license_plate("01KG123ABC");
        draft.set_body_type(2);
        draft.set_prepayment("500");
    }
    let mini = session.add_mini_order(vec![1, 2], 5).unwrap();
    session.add_material(mini, 7, "2");

    // Second vehicle for the same client: interior detail by Nurlan
    session.batch_mut().next();
    session.batch_mut().current_mut().set_license_plate("01KG456DEF");
    session.add_mini_order(vec![3], 6).unwrap();

    let ids = session.submit_all().await.unwrap();
    assert_eq!(ids, vec![101, 102]);
    assert_eq!(session.state(), SessionState::Reviewing);

    // Both submissions went out, sequentially, in draft order
    let created = backend.created.lock().unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0].car_license_plate, "01KG123ABC");
    assert_eq!(created[0].client_first_name, "Askar");
    assert_eq!(created[0].client_last_name, "Mamytov");
    assert_eq!(created[0].mini_orders[0].commission_rate, "10.00");
    assert_eq!(created[0].mini_orders[0].materials[0].quantity, "2");
    assert_eq!(created[1].car_license_plate, "01KG456DEF");
    drop(created);

    // Receipt set mirrors the batch: 100 + 200 + 2*50 = 400.00, then 350.50
    let receipts = session.receipts().receipts();
    assert_eq!(receipts.len(), 2);
    assert_eq!(receipts[0].order_id, 101);
    assert_eq!(receipts[0].order_number, 1);
    assert_eq!(receipts[0].total_amount, "400.00");
    assert_eq!(receipts[0].prepayment, "500.00");
    assert_eq!(receipts[1].total_amount, "350.50");
    assert_eq!(receipts[1].order_number, 2);

    // Page through the review dialog and close it
    assert_eq!(session.receipts().current().unwrap().order_id, 101);
    session.receipts_mut().next();
    assert_eq!(session.receipts().current().unwrap().order_id, 102);
    session.receipts_mut().next();
    assert_eq!(session.receipts().cursor(), 1);
    session.receipts_mut().prev();
    assert_eq!(session.receipts().current().unwrap().order_id, 101);

    session.close_review();
    assert!(session.receipts().is_empty());
    assert_eq!(session.batch().len(), 1);
}

#[tokio::test]
async fn bad_catalog_entry_does_not_block_the_review() {
    let (mut session, _backend) = start_session().await;

    let mini = session.add_mini_order(vec![1], 5).unwrap();
    // Material 999 is not in the backend catalog
    session.add_material(mini, 999, "3");

    let ids = session.submit_all().await.unwrap();
    assert_eq!(ids.len(), 1);
    assert_eq!(session.state(), SessionState::Reviewing);

    let receipt = &session.receipts().receipts()[0];
    let stub = &receipt.materials[0];
    assert_eq!(stub.name, "Material");
    assert_eq!(stub.price, "0.00");
    assert_eq!(receipt.total_amount, "100.00");
}

#[tokio::test]
async fn shared_phone_error_blocks_the_whole_batch() {
    let (mut session, backend) = start_session().await;
    session.batch_mut().client_phone = "87001234567".to_string();
    session.add_mini_order(vec![1], 5).unwrap();
    session.batch_mut().next();
    session.add_mini_order(vec![2], 6).unwrap();

    let result = session.submit_all().await;

    match result {
        Err(ConsoleError::Validation(errors)) => {
            assert_eq!(errors.len(), 2);
            assert!(errors.iter().all(|e| e.contains_key("client_phone")));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(backend.created.lock().unwrap().len(), 0);
    assert_eq!(session.state(), SessionState::Editing);
}
