use crate::domain::errors::DomainError;
use crate::domain::phone::Phone;
use crate::domain::ports::PhoneRepository;

#[derive(Clone)]
pub struct CatalogService<R> {
    repo: R,
}

impl<R: PhoneRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Phones that can be ordered right now, in id order.
    pub fn list_available(&self) -> Result<Vec<Phone>, DomainError> {
        let phones = self.repo.list_available()?;
        // Repositories filter already; this guards the display contract.
        Ok(phones.into_iter().filter(Phone::is_listed).collect())
    }

    pub fn get_phone(&self, id: i64) -> Result<Phone, DomainError> {
        self.repo
            .find(id)?
            .ok_or_else(|| DomainError::NotFound("Phone not found".to_string()))
    }
}
