mod common;

use common::{create_test_pool, create_test_user};

use tm_db::{TokenRepository, UserRepository};

use chrono::{Duration, Utc};
use googletest::prelude::*;

#[tokio::test]
async fn given_user_when_token_inserted_then_listed_for_user() {
    // Given
    let pool = create_test_pool().await;
    let user = create_test_user(1);
    UserRepository::create(&pool, &user).await.unwrap();

    // When
    TokenRepository::insert(&pool, user.id, "token-a", Utc::now())
        .await
        .unwrap();

    // Then
    let tokens = TokenRepository::list_for_user(&pool, user.id).await.unwrap();
    assert_that!(tokens, elements_are![eq("token-a")]);
}

#[tokio::test]
async fn given_multiple_tokens_when_listed_then_ordered_by_issuance() {
    let pool = create_test_pool().await;
    let user = create_test_user(1);
    UserRepository::create(&pool, &user).await.unwrap();

    let now = Utc::now();
    TokenRepository::insert(&pool, user.id, "token-b", now)
        .await
        .unwrap();
    TokenRepository::insert(&pool, user.id, "token-c", now + Duration::seconds(1))
        .await
        .unwrap();
    TokenRepository::insert(&pool, user.id, "token-a", now + Duration::seconds(2))
        .await
        .unwrap();

    let tokens = TokenRepository::list_for_user(&pool, user.id).await.unwrap();

    assert_that!(
        tokens,
        elements_are![eq("token-b"), eq("token-c"), eq("token-a")]
    );
}

#[tokio::test]
async fn given_issued_token_when_deleted_then_exactly_that_token_removed() {
    let pool = create_test_pool().await;
    let user = create_test_user(1);
    UserRepository::create(&pool, &user).await.unwrap();

    let now = Utc::now();
    TokenRepository::insert(&pool, user.id, "token-a", now)
        .await
        .unwrap();
    TokenRepository::insert(&pool, user.id, "token-b", now)
        .await
        .unwrap();

    // When
    let rows = TokenRepository::delete(&pool, user.id, "token-a")
        .await
        .unwrap();

    // Then
    assert_that!(rows, eq(1));
    let tokens = TokenRepository::list_for_user(&pool, user.id).await.unwrap();
    assert_that!(tokens, elements_are![eq("token-b")]);
}

#[tokio::test]
async fn given_absent_token_when_deleted_then_zero_rows_and_no_error() {
    let pool = create_test_pool().await;
    let user = create_test_user(1);
    UserRepository::create(&pool, &user).await.unwrap();

    let rows = TokenRepository::delete(&pool, user.id, "never-issued")
        .await
        .unwrap();

    assert_that!(rows, eq(0));
}

#[tokio::test]
async fn given_several_tokens_when_all_deleted_then_list_is_empty() {
    let pool = create_test_pool().await;
    let user = create_test_user(1);
    UserRepository::create(&pool, &user).await.unwrap();

    let now = Utc::now();
    for token in ["token-a", "token-b", "token-c"] {
        TokenRepository::insert(&pool, user.id, token, now)
            .await
            .unwrap();
    }

    let rows = TokenRepository::delete_all_for_user(&pool, user.id)
        .await
        .unwrap();

    assert_that!(rows, eq(3));
    let tokens = TokenRepository::list_for_user(&pool, user.id).await.unwrap();
    assert_that!(tokens, is_empty());
}

#[tokio::test]
async fn given_issued_token_when_existence_checked_then_true_until_revoked() {
    let pool = create_test_pool().await;
    let user = create_test_user(1);
    UserRepository::create(&pool, &user).await.unwrap();

    TokenRepository::insert(&pool, user.id, "token-a", Utc::now())
        .await
        .unwrap();

    assert_that!(
        TokenRepository::exists(&pool, user.id, "token-a")
            .await
            .unwrap(),
        eq(true)
    );

    TokenRepository::delete(&pool, user.id, "token-a")
        .await
        .unwrap();

    assert_that!(
        TokenRepository::exists(&pool, user.id, "token-a")
            .await
            .unwrap(),
        eq(false)
    );
}
