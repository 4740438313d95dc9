pub mod email_record;
