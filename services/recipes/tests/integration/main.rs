mod helpers;
mod recipe_test;
mod shopping_list_test;
mod subscription_test;
