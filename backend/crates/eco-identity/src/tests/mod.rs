mod login_policy;
