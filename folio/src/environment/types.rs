use folio_cache_memory::MemoryCache;
use folio_core_blog_impl::BlogServiceImpl;
use folio_core_contact_impl::ContactServiceImpl;
use folio_core_revalidate_impl::RevalidateServiceImpl;
use folio_email_impl::EmailServiceImpl;
use folio_extern_impl::{
    cdn::CdnApiServiceImpl, content::ContentApiServiceImpl, email::EmailApiServiceImpl,
};
use folio_shared_impl::{id::IdServiceImpl, secret::SecretStoreServiceImpl, time::TimeServiceImpl};
use folio_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = folio_api_rest::RestServer<Contact, Revalidate, Blog>;

// Cache
pub type Cache = MemoryCache;

// Extern
pub type EmailApi = EmailApiServiceImpl;
pub type CdnApi = CdnApiServiceImpl;
pub type ContentApi = ContentApiServiceImpl;

// Shared
pub type Id = IdServiceImpl;
pub type Time = TimeServiceImpl;
pub type SecretStore = SecretStoreServiceImpl;

// Templates
pub type Template = TemplateServiceImpl;

// Email
pub type Email = EmailServiceImpl<SecretStore, EmailApi>;

// Core
pub type Contact = ContactServiceImpl<Email, Template>;
pub type Revalidate = RevalidateServiceImpl<Time, Id, CdnApi, Cache>;
pub type Blog = BlogServiceImpl<ContentApi, Cache>;
