mod statement;
