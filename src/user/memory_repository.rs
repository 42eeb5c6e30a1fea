use super::{models::User, repository::UserDao};
use crate::{dao::memory_repository::InMemoryDao, errors::ServiceError};
use async_trait::async_trait;

pub type InMemoryUserDao = InMemoryDao<User>;

#[async_trait]
impl UserDao for InMemoryDao<User> {
    async fn find_all_by_login(&self, login: &str) -> Result<Vec<User>, ServiceError> {
        Ok(self.filter(|u| u.login == login).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::repository::GenericDao;

    #[tokio::test]
    async fn test_find_all_by_login() {
        let dao = InMemoryUserDao::new();
        dao.insert(User::new("alice", "x")).await.unwrap();
        dao.insert(User::new("bob", "x")).await.unwrap();
        dao.insert(User::new("bob", "y")).await.unwrap();

        assert_eq!(dao.find_all_by_login("alice").await.unwrap().len(), 1);
        assert_eq!(dao.find_all_by_login("bob").await.unwrap().len(), 2);
        assert!(dao.find_all_by_login("carol").await.unwrap().is_empty());
    }
}
