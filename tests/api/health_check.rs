use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check_works() {
    // Arrange
    let test_app = spawn_app().await;

    // Act
    let response = test_app
        .api_client
        .get(format!("{}/health_check", test_app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn health_check_works_without_admin_api_configuration() {
    let test_app = crate::helpers::spawn_app_with(|c| {
        c.admin_api.base_url = None;
        c.admin_api.service_role_key = None;
    })
    .await;

    let response = test_app
        .api_client
        .get(format!("{}/health_check", test_app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
}
